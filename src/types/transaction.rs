//! Transaction-related types for the sales analytics pipeline
//!
//! This module defines the validated transaction record and its enriched
//! counterpart produced by the enrichment join.

use rust_decimal::Decimal;

/// Validated sales transaction
///
/// Created only by the record parser once every validation rule has passed.
/// Field values are immutable once created; aggregations read them through
/// shared slices.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// Transaction identifier, always starts with `T`
    pub transaction_id: String,

    /// Transaction date as it appeared in the source file
    ///
    /// Never parsed as a calendar type. Grouping and range computations compare
    /// the raw strings, so ISO `YYYY-MM-DD` dates give chronological results.
    pub date: String,

    /// Internal product identifier, always starts with `P`
    pub product_id: String,

    /// Product name with commas replaced by spaces
    pub product_name: String,

    /// Units sold, strictly positive
    pub quantity: u64,

    /// Price per unit, strictly positive
    pub unit_price: Decimal,

    /// Customer identifier, never blank
    pub customer_id: String,

    /// Sales region, never blank
    pub region: String,
}

impl Transaction {
    /// Monetary value of this transaction (`quantity × unit_price`)
    ///
    /// Recomputed on every call rather than stored, so every aggregation sees
    /// the same value for the same record. Saturates at `Decimal::MAX`; the
    /// parser rejects records for which [`Transaction::checked_line_total`]
    /// is `None`, so parsed records always get the exact product.
    pub fn line_total(&self) -> Decimal {
        Decimal::from(self.quantity).saturating_mul(self.unit_price)
    }

    /// `quantity × unit_price`, or `None` if it does not fit in a `Decimal`
    pub fn checked_line_total(&self) -> Option<Decimal> {
        Decimal::from(self.quantity).checked_mul(self.unit_price)
    }
}

/// Transaction annotated with product catalog metadata
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedTransaction {
    /// The source transaction, unchanged
    pub transaction: Transaction,

    /// Catalog category (None when unmatched or not provided)
    pub api_category: Option<String>,

    /// Catalog brand (None when unmatched or not provided)
    pub api_brand: Option<String>,

    /// Catalog rating (None when unmatched or not provided)
    pub api_rating: Option<f64>,

    /// Whether the derived enrichment key was found in the catalog
    pub api_match: bool,
}

impl EnrichedTransaction {
    /// Wrap a transaction that found no catalog entry
    pub fn unmatched(transaction: Transaction) -> Self {
        EnrichedTransaction {
            transaction,
            api_category: None,
            api_brand: None,
            api_rating: None,
            api_match: false,
        }
    }
}
