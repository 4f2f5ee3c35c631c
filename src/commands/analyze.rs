//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Imports records from a file or URL
//! 2. Applies the filter specification
//! 3. Computes summary statistics
//! 4. Computes one aggregate per dashboard panel
//! 5. Prints charts (and optionally the record table) and writes the report

use super::source::{build_filter, InputSource};
use crate::aggregator::{filter_records, summarize};
use crate::dashboard::{compute_panels, load_layout, render_dashboard, render_summary};
use crate::output::{page_count, render_table, write_report, AnalysisReport};
use crate::utils::config::{DEFAULT_FETCH_TIMEOUT, DEFAULT_LAYOUT_FILE, TABLE_PAGE_SIZES};
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Where the capture comes from
    pub source: InputSource,

    /// `field=value[,value...]` constraints
    pub filters: Vec<String>,

    /// JSON filter specification file
    pub filter_file: Option<PathBuf>,

    /// Dashboard layout file (default layout when missing)
    pub layout: PathBuf,

    /// Output path for the JSON report (optional)
    pub output_json: Option<PathBuf>,

    /// Print the record table after the charts
    pub show_table: bool,

    /// Zero-based table page
    pub page: usize,

    /// Table rows per page
    pub page_size: usize,

    /// Rows shown per chart
    pub max_rows: usize,

    /// Timeout for URL imports
    pub fetch_timeout: Duration,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            source: InputSource::File(PathBuf::from("capture.har")),
            filters: Vec::new(),
            filter_file: None,
            layout: PathBuf::from(DEFAULT_LAYOUT_FILE),
            output_json: None,
            show_table: false,
            page: 0,
            page_size: 10,
            max_rows: 10,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if !TABLE_PAGE_SIZES.contains(&args.page_size) {
        anyhow::bail!(
            "page size must be one of {:?}, got {}",
            TABLE_PAGE_SIZES,
            args.page_size
        );
    }

    if args.max_rows == 0 {
        anyhow::bail!("max rows must be greater than 0");
    }

    if args.fetch_timeout.is_zero() {
        anyhow::bail!("fetch timeout must be greater than 0");
    }

    Ok(())
}

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Import failures (unreadable file, fetch error, unrecognized shape)
/// * Malformed filter arguments or filter file
/// * Unreadable layout file
/// * Report write errors
pub fn execute_analyze(args: AnalyzeArgs) -> Result<AnalysisReport> {
    let start_time = Instant::now();

    info!("Step 1/5: Importing records from {}...", args.source);
    let records = args.source.load(args.fetch_timeout)?;

    info!("Step 2/5: Applying filters...");
    let filter = build_filter(&args.filters, args.filter_file.as_deref())?;
    let filtered = filter_records(&records, &filter);
    info!("{} of {} records match", filtered.len(), records.len());

    info!("Step 3/5: Summarizing traffic...");
    let summary = summarize(&filtered);
    debug!("{}", summary.summary());

    info!("Step 4/5: Computing dashboard panels...");
    let layout = load_layout(&args.layout)
        .with_context(|| format!("Failed to load layout {}", args.layout.display()))?;
    let panels = compute_panels(&filtered, &layout);
    debug!("Computed {} panels", panels.len());

    info!("Step 5/5: Rendering output...");
    println!("{}", render_summary(&summary, records.len()));
    println!();
    println!("{}", render_dashboard(&panels, args.max_rows));

    if args.show_table {
        let pages = page_count(filtered.len(), args.page_size);
        if pages > 0 && args.page >= pages {
            anyhow::bail!("page {} is out of range (1-{})", args.page + 1, pages);
        }
        println!();
        println!("{}", render_table(&filtered, args.page, args.page_size));
    }

    let report = AnalysisReport::new(
        args.source.to_string(),
        records.len(),
        filter,
        summary,
        panels,
    );

    if let Some(path) = &args.output_json {
        write_report(&report, path).context("Failed to write analysis report")?;
        info!("✓ Report written to: {}", path.display());
    }

    info!("Analysis completed in {:.2}s", start_time.elapsed().as_secs_f64());

    Ok(report)
}
