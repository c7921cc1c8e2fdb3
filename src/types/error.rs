//! Error types for the sales analytics pipeline
//!
//! Malformed input records never reach this type: the parser counts and drops
//! them. What remains are the conditions a caller must react to.
//!
//! # Error Categories
//!
//! - **Degenerate input**: a report requested over zero records
//! - **File I/O Errors**: output files that cannot be created or written
//! - **Export Errors**: the pipe-delimited writer failed
//! - **Catalog Errors**: the product catalog could not be read or decoded
//! - **Overflow**: report totals that do not fit their numeric type

use thiserror::Error;

/// Main error type for the sales analytics pipeline
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalyticsError {
    /// No transactions were left to report on
    ///
    /// Average order value and date range are undefined for an empty
    /// collection, so the report refuses to render.
    #[error("No transactions to report on")]
    ZeroRecords,

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// The enriched export could not be written
    #[error("Export error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ExportError {
        /// Output line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the writer error
        message: String,
    },

    /// A report total does not fit its numeric type
    ///
    /// Individual records are bounded by the parser, but enough large records
    /// can still sum past `Decimal::MAX` or `u64::MAX`.
    #[error("Arithmetic overflow while computing {what}")]
    Overflow {
        /// Name of the total that overflowed
        what: String,
    },

    /// The product catalog could not be loaded
    ///
    /// This is a recoverable error - the catalog source logs it and reports
    /// zero products.
    #[error("Catalog error for '{path}': {message}")]
    CatalogError {
        /// Catalog location
        path: String,
        /// Description of the failure
        message: String,
    },
}

// Conversion from io::Error to AnalyticsError
impl From<std::io::Error> for AnalyticsError {
    fn from(error: std::io::Error) -> Self {
        AnalyticsError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to AnalyticsError
impl From<csv::Error> for AnalyticsError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        AnalyticsError::ExportError {
            line,
            message: error.to_string(),
        }
    }
}

impl AnalyticsError {
    /// Create an Overflow error
    pub fn overflow(what: &str) -> Self {
        AnalyticsError::Overflow {
            what: what.to_string(),
        }
    }

    /// Create a CatalogError
    pub fn catalog(path: &str, message: impl ToString) -> Self {
        AnalyticsError::CatalogError {
            path: path.to_string(),
            message: message.to_string(),
        }
    }
}
