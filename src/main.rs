//! Sales Analytics CLI
//!
//! Command-line interface for cleaning, analyzing and enriching pipe-delimited
//! sales data.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- data/sales_data.txt
//! cargo run -- data/sales_data.txt --catalog data/products.json
//! cargo run -- data/sales_data.txt --catalog-url --catalog-timeout 5
//! cargo run -- data/sales_data.txt --region North --top-n 3
//! cargo run -- --interactive --log-level debug
//! ```
//!
//! The program reads the raw sales file, drops malformed records, optionally
//! narrows to one region, enriches each record from the product catalog and
//! writes the enriched export and the text report. Progress is logged to
//! stderr.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (no valid records, output not writable, invalid arguments, etc.)

use anyhow::{Context, Result};
use chrono::Local;
use sales_analytics::cli;
use sales_analytics::pipeline::Pipeline;
use std::io::stderr;
use std::process;
use tracing::level_filters::LevelFilter;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

fn main() {
    let args = cli::parse_args();
    setup_logging(args.log_level.into());

    if let Err(e) = run(&args) {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(args: &cli::CliArgs) -> Result<()> {
    let catalog = args.catalog_source().build();

    let pipeline = Pipeline::new(args.to_pipeline_config());
    let generated_at = Local::now().naive_local();

    let summary = pipeline
        .run(catalog.as_ref(), &generated_at)
        .with_context(|| format!("Pipeline failed for {}", args.input_file.display()))?;

    info!(
        valid = summary.valid_records,
        invalid = summary.invalid_records,
        enriched = summary.enrichment.matched,
        "Pipeline complete"
    );
    println!("Enriched data: {}", pipeline.config().enriched_output_path.display());
    println!("Report: {}", pipeline.config().report_output_path.display());

    Ok(())
}

fn setup_logging(level: LevelFilter) {
    // stdout carries the interactive prompt, so logs go to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry().with(terminal_log).init();
}
