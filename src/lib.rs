//! Sales Analytics Library
//! # Overview
//!
//! This library cleans pipe-delimited sales records, aggregates them into
//! revenue, region, product, customer and daily views, enriches them with
//! product catalog metadata and renders a fixed-section text report.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Transaction, EnrichedTransaction, catalog products, errors)
//! - [`cli`] - CLI arguments parsing and the region filter prompt
//! - [`core`] - Business logic components:
//!   - [`core::parser`] - Validation of raw lines into typed transactions
//!   - [`core::analytics`] - Pure aggregations over a transaction slice
//!   - [`core::enrichment`] - Join of transactions against the product mapping
//! - [`report`] - Text report rendering with an explicit currency format
//! - [`io`] - Sales file reader, product catalog sources, enriched export writer
//! - [`pipeline`] - Ten-step orchestration from raw file to written outputs
//!
//! # Record Validation
//!
//! A raw line becomes a transaction only if:
//!
//! - it has exactly eight `|`-separated fields
//! - the product id starts with `P` and the transaction id with `T`
//! - customer id and region are non-blank
//! - quantity and unit price parse (commas allowed) and are both positive
//!
//! Anything else is counted as invalid and dropped.
//!
//! # Money
//!
//! Amounts are `rust_decimal::Decimal` end to end. Rounding to the display
//! precision happens only when values are formatted or ranked.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod pipeline;
pub mod report;
pub mod types;

pub use core::{enrich, parse_and_clean, EnrichmentStats, ParseOutcome};
pub use io::{read_sales_data, write_enriched_export, ProductCatalog};
pub use pipeline::{Pipeline, PipelineConfig, PipelineSummary, RegionFilterMode};
pub use report::{render_report, ReportConfig, ReportFormat};
pub use types::{AnalyticsError, EnrichedTransaction, ProductMapping, Transaction};
