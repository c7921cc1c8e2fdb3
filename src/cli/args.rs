use crate::io::{
    EmptyCatalog, HttpCatalog, JsonFileCatalog, ProductCatalog, DEFAULT_CATALOG_TIMEOUT,
    DEFAULT_CATALOG_URL,
};
use crate::pipeline::{PipelineConfig, RegionFilterMode};
use crate::report::{ReportConfig, ReportFormat};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;
use tracing::level_filters::LevelFilter;

/// Clean, analyze and enrich pipe-delimited sales data
#[derive(Parser, Debug)]
#[command(name = "sales-analytics")]
#[command(about = "Clean, analyze and enrich pipe-delimited sales data", long_about = None)]
pub struct CliArgs {
    /// Raw sales file to analyze
    #[arg(
        value_name = "INPUT",
        default_value = "data/sales_data.txt",
        help = "Path to the pipe-delimited sales file"
    )]
    pub input_file: PathBuf,

    /// Product catalog JSON file
    #[arg(
        long = "catalog",
        value_name = "PATH",
        help = "Product catalog JSON ({\"products\": [...]}); without it no product is enriched"
    )]
    pub catalog: Option<PathBuf>,

    /// Product catalog endpoint
    #[arg(
        long = "catalog-url",
        value_name = "URL",
        num_args = 0..=1,
        default_missing_value = DEFAULT_CATALOG_URL,
        conflicts_with = "catalog",
        help = "Fetch the product catalog over HTTP (default endpoint when URL is omitted)"
    )]
    pub catalog_url: Option<String>,

    #[arg(
        long = "catalog-timeout",
        value_name = "SECONDS",
        default_value_t = DEFAULT_CATALOG_TIMEOUT.as_secs(),
        help = "Upper bound on the catalog request"
    )]
    pub catalog_timeout: u64,

    #[arg(
        long = "enriched-output",
        value_name = "PATH",
        default_value = "data/enriched_sales_data.txt",
        help = "Where to write the enriched pipe-delimited export"
    )]
    pub enriched_output: PathBuf,

    #[arg(
        long = "report-output",
        value_name = "PATH",
        default_value = "output/sales_report.txt",
        help = "Where to write the text report"
    )]
    pub report_output: PathBuf,

    /// Keep only this region (case-insensitive)
    #[arg(
        long = "region",
        value_name = "NAME",
        conflicts_with = "interactive",
        help = "Filter records to a single region"
    )]
    pub region: Option<String>,

    #[arg(
        long = "interactive",
        help = "Ask on stdin whether to filter by region"
    )]
    pub interactive: bool,

    #[arg(
        long = "top-n",
        value_name = "N",
        default_value_t = crate::core::DEFAULT_TOP_N,
        help = "Rows in the top products table"
    )]
    pub top_n: usize,

    #[arg(
        long = "low-threshold",
        value_name = "N",
        default_value_t = crate::core::DEFAULT_LOW_THRESHOLD,
        help = "Products sold fewer times than this are listed as low performers"
    )]
    pub low_threshold: u64,

    #[arg(
        long = "currency",
        value_name = "SYMBOL",
        default_value = crate::report::format::DEFAULT_CURRENCY_SYMBOL,
        help = "Currency symbol used in the report"
    )]
    pub currency: String,

    #[arg(
        long = "decimals",
        value_name = "N",
        default_value_t = crate::report::format::DEFAULT_DECIMAL_PLACES,
        help = "Decimal places for money and percentages"
    )]
    pub decimals: u32,

    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        default_value = "info",
        help = "Log verbosity written to stderr"
    )]
    pub log_level: LogLevel,
}

/// Log verbosity levels accepted on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// Where product metadata comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    None,
    File(PathBuf),
    Http { url: String, timeout: Duration },
}

impl CatalogSource {
    pub fn build(&self) -> Box<dyn ProductCatalog> {
        match self {
            CatalogSource::None => Box::new(EmptyCatalog),
            CatalogSource::File(path) => Box::new(JsonFileCatalog::new(path)),
            CatalogSource::Http { url, timeout } => Box::new(HttpCatalog::new(url, *timeout)),
        }
    }
}

impl CliArgs {
    /// Catalog selected by `--catalog` or `--catalog-url`
    pub fn catalog_source(&self) -> CatalogSource {
        match (&self.catalog, &self.catalog_url) {
            (Some(path), _) => CatalogSource::File(path.clone()),
            (None, Some(url)) => CatalogSource::Http {
                url: url.clone(),
                timeout: Duration::from_secs(self.catalog_timeout),
            },
            (None, None) => CatalogSource::None,
        }
    }

    /// Create a PipelineConfig from CLI arguments
    ///
    /// `--region` takes precedence as a fixed filter; `--interactive` defers
    /// the choice to a prompt at run time. clap rejects passing both.
    ///
    /// # Returns
    ///
    /// A `PipelineConfig` with paths, region filter mode and report settings.
    pub fn to_pipeline_config(&self) -> PipelineConfig {
        let region_filter = match (&self.region, self.interactive) {
            (Some(region), _) => RegionFilterMode::Region(region.clone()),
            (None, true) => RegionFilterMode::Interactive,
            (None, false) => RegionFilterMode::None,
        };

        PipelineConfig {
            input_path: self.input_file.clone(),
            enriched_output_path: self.enriched_output.clone(),
            report_output_path: self.report_output.clone(),
            region_filter,
            report: ReportConfig {
                format: ReportFormat::new(self.currency.clone(), self.decimals),
                top_n: self.top_n,
                low_threshold: self.low_threshold,
            },
        }
    }
}
