//! Output writers for analysis results.
//!
//! This module handles:
//! - JSON analysis reports (write and read back)
//! - Canonical record exports
//! - Paginated text tables

pub mod json;
pub mod report;
pub mod table;

// Re-export main functions
pub use json::{read_report, validate_path, write_records, write_report};
pub use report::AnalysisReport;
pub use table::{page_count, render_table, COLUMNS};
