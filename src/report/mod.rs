//! Report module
//!
//! - `format` - Currency and precision settings for rendered values
//! - `renderer` - Fixed-section text report

pub mod format;
pub mod renderer;

pub use format::{ReportConfig, ReportFormat};
pub use renderer::render_report;
