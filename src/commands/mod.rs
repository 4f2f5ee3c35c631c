//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod analyze;
pub mod export;
pub mod inspect;
pub mod source;

// Re-export main command functions
pub use analyze::{execute_analyze, validate_args, AnalyzeArgs};
pub use export::{execute_export, ExportArgs};
pub use inspect::{display_version, list_values, show_layout, validate_report_file};
pub use source::{build_filter, InputSource};
