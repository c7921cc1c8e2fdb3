// CLI module
// Command-line interface, argument parsing and the region filter prompt

mod args;
pub mod region_filter;

pub use args::{CatalogSource, CliArgs, LogLevel};
pub use region_filter::{available_regions, filter_by_region, prompt_region_filter, FilterSummary};

use clap::Parser;

/// Parse command-line arguments using clap
///
/// If parsing fails (invalid arguments or `--help`), clap displays an error
/// message or help text and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
