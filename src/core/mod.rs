//! Core business logic module
//!
//! This module contains the analytics components:
//! - `parser` - Raw line validation into typed transactions
//! - `analytics` - Revenue, region, product, customer and daily aggregations
//! - `enrichment` - Join of transactions against product catalog metadata

pub mod analytics;
pub mod enrichment;
pub mod parser;

pub use analytics::{
    check_totals, customer_analysis, daily_trend, date_range, low_performing_products, peak_sales_day,
    region_breakdown, top_products, total_revenue, CustomerSummary, DailySales, PeakDay,
    ProductSales, RegionSales, DEFAULT_LOW_THRESHOLD, DEFAULT_TOP_N,
};
pub use enrichment::{enrich, enrichment_key, EnrichmentStats};
pub use parser::{parse_and_clean, parse_line, ParseOutcome, RejectReason};
