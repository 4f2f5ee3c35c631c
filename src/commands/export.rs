//! Export command: write the (filtered) canonical records as a JSON array.

use super::source::{build_filter, InputSource};
use crate::aggregator::filter_records;
use crate::output::write_records;
use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;
use std::time::Duration;

/// Arguments for the export command
#[derive(Debug, Clone)]
pub struct ExportArgs {
    pub source: InputSource,
    pub filters: Vec<String>,
    pub filter_file: Option<PathBuf>,
    pub output: PathBuf,
    pub fetch_timeout: Duration,
}

/// Import, filter and write records; returns how many were written
pub fn execute_export(args: ExportArgs) -> Result<usize> {
    let records = args.source.load(args.fetch_timeout)?;
    let filter = build_filter(&args.filters, args.filter_file.as_deref())?;
    let filtered = filter_records(&records, &filter);

    write_records(&filtered, &args.output)
        .with_context(|| format!("Failed to export records to {}", args.output.display()))?;

    info!(
        "✓ Exported {} of {} records to: {}",
        filtered.len(),
        records.len(),
        args.output.display()
    );

    Ok(filtered.len())
}
