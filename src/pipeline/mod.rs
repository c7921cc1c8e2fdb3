//! Pipeline orchestration
//!
//! Runs the ten steps from raw sales file to report:
//!
//! 1. Read raw lines
//! 2. Parse and clean records
//! 3. Apply the region filter
//! 4. Fetch the product catalog
//! 5. Build the product mapping
//! 6. Enrich transactions
//! 7. Render the enriched export
//! 8. Render the report
//! 9. Write the enriched export
//! 10. Write the report
//!
//! Steps 7 and 8 render into memory. Nothing is written to disk until every
//! earlier step has succeeded, so a failed run leaves no partial output.

use crate::cli::{filter_by_region, prompt_region_filter, FilterSummary};
use crate::core::{enrich, parse_and_clean, EnrichmentStats};
use crate::io::{create_product_mapping, read_sales_data, write_enriched_export, ProductCatalog};
use crate::report::{render_report, ReportConfig};
use crate::types::{AnalyticsError, Transaction};
use chrono::NaiveDateTime;
use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const TOTAL_STEPS: usize = 10;

/// How records are narrowed to a region before analysis
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RegionFilterMode {
    #[default]
    None,
    /// Fixed region given up front
    Region(String),
    /// Ask on the interactive input
    Interactive,
}

/// Everything a pipeline run needs besides the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub input_path: PathBuf,
    pub enriched_output_path: PathBuf,
    pub report_output_path: PathBuf,
    pub region_filter: RegionFilterMode,
    pub report: ReportConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            input_path: PathBuf::from("data/sales_data.txt"),
            enriched_output_path: PathBuf::from("data/enriched_sales_data.txt"),
            report_output_path: PathBuf::from("output/sales_report.txt"),
            region_filter: RegionFilterMode::None,
            report: ReportConfig::default(),
        }
    }
}

/// Counts and outcomes of a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSummary {
    pub raw_lines: usize,
    pub valid_records: usize,
    pub invalid_records: usize,
    pub filter: FilterSummary,
    pub catalog_products: usize,
    pub enrichment: EnrichmentStats,
}

pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Pipeline { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the pipeline, prompting on stdin/stdout when the filter is interactive
    ///
    /// # Errors
    ///
    /// See [`Pipeline::run_with_io`].
    pub fn run(
        &self,
        catalog: &dyn ProductCatalog,
        generated_at: &NaiveDateTime,
    ) -> Result<PipelineSummary, AnalyticsError> {
        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        let mut output = std::io::stdout();
        self.run_with_io(catalog, generated_at, &mut input, &mut output)
    }

    /// Run the pipeline with explicit prompt streams
    ///
    /// # Arguments
    ///
    /// * `catalog` - Source of product metadata for enrichment
    /// * `generated_at` - Timestamp printed in the report header
    /// * `input` / `output` - Streams used only by the interactive region filter
    ///
    /// # Returns
    ///
    /// A `PipelineSummary` describing the run.
    ///
    /// # Errors
    ///
    /// - `AnalyticsError::ZeroRecords` if no records survive cleaning and filtering
    /// - `AnalyticsError::ExportError` if the export cannot be rendered
    /// - `AnalyticsError::IoError` if prompting fails or an output file cannot be written
    pub fn run_with_io<R: BufRead, W: Write>(
        &self,
        catalog: &dyn ProductCatalog,
        generated_at: &NaiveDateTime,
        input: &mut R,
        output: &mut W,
    ) -> Result<PipelineSummary, AnalyticsError> {
        let config = &self.config;

        step(1, "Reading sales data");
        let lines = read_sales_data(&config.input_path);
        info!(lines = lines.len(), path = %config.input_path.display(), "Read raw lines");

        step(2, "Parsing and cleaning records");
        let outcome = parse_and_clean(&lines);
        info!(
            valid = outcome.transactions.len(),
            invalid = outcome.invalid_count,
            "Cleaned records"
        );
        let valid_records = outcome.transactions.len();

        step(3, "Applying region filter");
        let (transactions, filter) = self.apply_region_filter(outcome.transactions, input, output)?;
        info!(%filter, "Region filter done");

        step(4, "Fetching product catalog");
        let products = catalog.fetch_products();
        info!(products = products.len(), "Catalog fetched");

        step(5, "Building product mapping");
        let mapping = create_product_mapping(&products);
        debug!(entries = mapping.len(), "Product mapping built");

        step(6, "Enriching transactions");
        let enriched = enrich(&transactions, &mapping);
        let enrichment = EnrichmentStats::from(enriched.as_slice());
        info!(
            matched = enrichment.matched,
            total = enrichment.total,
            "Enrichment done"
        );

        step(7, "Rendering enriched export");
        let mut export_buffer = Vec::new();
        write_enriched_export(&enriched, &mut export_buffer)?;

        step(8, "Rendering report");
        let mut report_buffer = Vec::new();
        render_report(
            &transactions,
            &enriched,
            &config.report,
            generated_at,
            &mut report_buffer,
        )?;

        step(9, "Writing enriched export");
        write_output(&config.enriched_output_path, &export_buffer)?;

        step(10, "Writing report");
        write_output(&config.report_output_path, &report_buffer)?;

        Ok(PipelineSummary {
            raw_lines: lines.len(),
            valid_records,
            invalid_records: outcome.invalid_count,
            filter,
            catalog_products: products.len(),
            enrichment,
        })
    }

    fn apply_region_filter<R: BufRead, W: Write>(
        &self,
        transactions: Vec<Transaction>,
        input: &mut R,
        output: &mut W,
    ) -> Result<(Vec<Transaction>, FilterSummary), AnalyticsError> {
        match &self.config.region_filter {
            RegionFilterMode::None => {
                let summary = FilterSummary::NotApplied {
                    total_records: transactions.len(),
                };
                Ok((transactions, summary))
            }
            RegionFilterMode::Region(region) => Ok(filter_by_region(transactions, region)),
            RegionFilterMode::Interactive => {
                Ok(prompt_region_filter(transactions, input, output)?)
            }
        }
    }
}

fn step(index: usize, description: &str) {
    info!("[{}/{}] {}", index, TOTAL_STEPS, description);
}

/// Write `contents` to `path`, creating missing parent directories
fn write_output(path: &Path, contents: &[u8]) -> Result<(), AnalyticsError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    info!(path = %path.display(), bytes = contents.len(), "Wrote output");
    Ok(())
}
