//! Record parser and validator
//!
//! Turns raw pipe-delimited lines into validated [`Transaction`] records.
//! Rejected lines are dropped and counted; the reason is only visible in
//! debug logs.
//!
//! Rules are applied in a fixed order and the first failing rule rejects the
//! line:
//!
//! 1. exactly 8 fields after splitting on `|`
//! 2. ProductID starts with `P`
//! 3. TransactionID starts with `T`
//! 4. CustomerID and Region are non-blank
//! 5. Quantity parses as an integer and UnitPrice as a decimal (commas stripped)
//! 6. Quantity and UnitPrice are strictly positive
//! 7. Quantity × UnitPrice fits in a `Decimal`

use crate::types::Transaction;
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Number of fields in a raw transaction line
pub const FIELD_COUNT: usize = 8;

/// Field delimiter of the raw transaction log
pub const DELIMITER: char = '|';

/// Why a raw line was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("expected {FIELD_COUNT} fields, found {0}")]
    FieldCount(usize),

    #[error("product id '{0}' does not start with 'P'")]
    ProductIdPrefix(String),

    #[error("transaction id '{0}' does not start with 'T'")]
    TransactionIdPrefix(String),

    #[error("customer id or region is blank")]
    BlankKeyField,

    #[error("quantity '{0}' is not an integer")]
    InvalidQuantity(String),

    #[error("unit price '{0}' is not a number")]
    InvalidUnitPrice(String),

    #[error("quantity and unit price must be positive")]
    NonPositive,

    #[error("line total of {quantity} × {unit_price} is out of range")]
    LineTotalOverflow { quantity: u64, unit_price: Decimal },
}

/// Result of cleaning a batch of raw lines
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParseOutcome {
    /// Accepted records, in input order
    pub transactions: Vec<Transaction>,

    /// Number of rejected lines
    pub invalid_count: usize,
}

/// Parse and validate a batch of raw lines
///
/// Lines are expected to be stripped of the header row and blank lines
/// already. Accepted records keep their input order.
pub fn parse_and_clean<I, S>(lines: I) -> ParseOutcome
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut outcome = ParseOutcome::default();

    for (index, line) in lines.into_iter().enumerate() {
        match parse_line(line.as_ref()) {
            Ok(transaction) => outcome.transactions.push(transaction),
            Err(reason) => {
                debug!("Rejected line {}: {}", index + 1, reason);
                outcome.invalid_count += 1;
            }
        }
    }

    outcome
}

/// Parse and validate a single raw line
///
/// # Errors
///
/// Returns the [`RejectReason`] of the first rule the line breaks.
pub fn parse_line(line: &str) -> Result<Transaction, RejectReason> {
    let fields: Vec<&str> = line.split(DELIMITER).collect();

    let [transaction_id, date, product_id, product_name, quantity, unit_price, customer_id, region] =
        fields[..]
    else {
        return Err(RejectReason::FieldCount(fields.len()));
    };

    if !product_id.starts_with('P') {
        return Err(RejectReason::ProductIdPrefix(product_id.to_string()));
    }

    if !transaction_id.starts_with('T') {
        return Err(RejectReason::TransactionIdPrefix(transaction_id.to_string()));
    }

    if customer_id.trim().is_empty() || region.trim().is_empty() {
        return Err(RejectReason::BlankKeyField);
    }

    let quantity = parse_quantity(quantity)?;
    let unit_price = parse_unit_price(unit_price)?;

    if quantity <= 0 || unit_price <= Decimal::ZERO {
        return Err(RejectReason::NonPositive);
    }

    let quantity = u64::try_from(quantity).map_err(|_| RejectReason::NonPositive)?;

    if Decimal::from(quantity).checked_mul(unit_price).is_none() {
        return Err(RejectReason::LineTotalOverflow { quantity, unit_price });
    }

    Ok(Transaction {
        transaction_id: transaction_id.to_string(),
        date: date.to_string(),
        product_id: product_id.to_string(),
        product_name: product_name.replace(',', " "),
        quantity,
        unit_price,
        customer_id: customer_id.to_string(),
        region: region.to_string(),
    })
}

fn parse_quantity(raw: &str) -> Result<i64, RejectReason> {
    strip_commas(raw)
        .parse::<i64>()
        .map_err(|_| RejectReason::InvalidQuantity(raw.to_string()))
}

fn parse_unit_price(raw: &str) -> Result<Decimal, RejectReason> {
    let cleaned = strip_commas(raw);

    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .map_err(|_| RejectReason::InvalidUnitPrice(raw.to_string()))
}

fn strip_commas(raw: &str) -> String {
    raw.replace(',', "").trim().to_string()
}
