//! Report formatting configuration
//!
//! Currency glyph and precision are explicit values handed to the renderer
//! instead of literals baked into format strings.

use crate::core::{DEFAULT_LOW_THRESHOLD, DEFAULT_TOP_N};
use rust_decimal::Decimal;

/// Default currency glyph
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

/// Default number of decimal places for money and percentages
pub const DEFAULT_DECIMAL_PLACES: u32 = 2;

/// Display format for monetary values and percentages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFormat {
    pub currency_symbol: String,
    pub decimal_places: u32,
}

impl Default for ReportFormat {
    fn default() -> Self {
        ReportFormat {
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            decimal_places: DEFAULT_DECIMAL_PLACES,
        }
    }
}

impl ReportFormat {
    pub fn new(currency_symbol: impl Into<String>, decimal_places: u32) -> Self {
        ReportFormat {
            currency_symbol: currency_symbol.into(),
            decimal_places,
        }
    }

    /// Format a monetary value, e.g. `₹1,234,567.89`
    pub fn money(&self, value: Decimal) -> String {
        let fixed = self.fixed(value);
        let (sign, unsigned) = match fixed.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", fixed.as_str()),
        };
        let (integer, fraction) = match unsigned.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (unsigned, None),
        };

        let mut formatted = format!("{}{}{}", sign, self.currency_symbol, group_thousands(integer));
        if let Some(fraction) = fraction {
            formatted.push('.');
            formatted.push_str(fraction);
        }
        formatted
    }

    /// Format a percentage value, e.g. `45.5%` or `60.0%`
    ///
    /// Rounded to the configured places with trailing zeros dropped, keeping
    /// at least one fractional digit.
    pub fn percent(&self, value: Decimal) -> String {
        let rounded = value.round_dp(self.decimal_places).normalize();
        if rounded.scale() == 0 {
            format!("{}.0%", rounded)
        } else {
            format!("{}%", rounded)
        }
    }

    fn fixed(&self, value: Decimal) -> String {
        let places = self.decimal_places as usize;
        format!("{:.places$}", value.round_dp(self.decimal_places))
    }
}

/// Insert `,` between every group of three digits
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Settings for a full report render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    pub format: ReportFormat,
    /// Rows in the top products table
    pub top_n: usize,
    /// Quantity below which a product is listed as a low performer
    pub low_threshold: u64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            format: ReportFormat::default(),
            top_n: DEFAULT_TOP_N,
            low_threshold: DEFAULT_LOW_THRESHOLD,
        }
    }
}
