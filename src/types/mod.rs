//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `transaction`: validated and enriched transaction records
//! - `product`: product catalog entries and the enrichment lookup
//! - `error`: Error types for the pipeline

pub mod error;
pub mod product;
pub mod transaction;

pub use error::AnalyticsError;
pub use product::{CatalogId, CatalogProduct, ProductInfo, ProductMapping};
pub use transaction::{EnrichedTransaction, Transaction};
