//! I/O module
//!
//! Handles everything that touches files outside the report itself.
//!
//! # Components
//!
//! - `sales_reader` - Raw sales file loading with encoding fallback
//! - `catalog` - Product catalog sources and the enrichment lookup builder
//! - `export` - Pipe-delimited export of enriched transactions

pub mod catalog;
pub mod export;
pub mod sales_reader;

pub use catalog::{
    create_product_mapping, EmptyCatalog, HttpCatalog, JsonFileCatalog, ProductCatalog,
    DEFAULT_CATALOG_TIMEOUT, DEFAULT_CATALOG_URL,
};
pub use export::write_enriched_export;
pub use sales_reader::read_sales_data;
