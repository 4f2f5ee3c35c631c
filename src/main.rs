//! Cache Analyzer CLI
//!
//! Imports HAR captures or JSON request arrays and reports CDN cache
//! behaviour by cache status, POP and domain.

use anyhow::Result;
use cache_analyzer::commands::{
    display_version, execute_analyze, execute_export, list_values, show_layout, validate_args,
    validate_report_file, AnalyzeArgs, ExportArgs, InputSource,
};
use cache_analyzer::utils::config::{DEFAULT_EXPORT_FILE, DEFAULT_LAYOUT_FILE};
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;
use std::time::Duration;

/// Cache Analyzer - CDN cache behaviour from network captures
#[derive(Parser, Debug)]
#[command(name = "cache-analyzer")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Where records are imported from
#[derive(Args, Debug)]
struct SourceOpts {
    /// HAR file or JSON array of request records
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// URL returning a HAR document or JSON array
    #[arg(short, long)]
    url: Option<String>,

    /// Timeout for URL imports, in seconds
    #[arg(long, env = "CACHE_ANALYZER_FETCH_TIMEOUT", default_value = "30")]
    timeout: u64,
}

impl SourceOpts {
    fn resolve(self) -> Result<(InputSource, Duration)> {
        let source = InputSource::from_options(self.input, self.url)?;
        Ok((source, Duration::from_secs(self.timeout)))
    }
}

/// Which records to keep
#[derive(Args, Debug)]
struct FilterOpts {
    /// Constraint as field=value[,value...]; repeatable, `null` means absent
    #[arg(short, long = "filter")]
    filters: Vec<String>,

    /// JSON filter specification file, e.g. {"status": [200, 304]}
    #[arg(long)]
    filter_file: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Import a capture, filter it and chart cache behaviour
    Analyze {
        #[command(flatten)]
        source: SourceOpts,

        #[command(flatten)]
        filter: FilterOpts,

        /// Dashboard layout file
        #[arg(long, env = "CACHE_ANALYZER_LAYOUT", default_value = DEFAULT_LAYOUT_FILE)]
        layout: PathBuf,

        /// Output path for the JSON report (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the record table
        #[arg(long)]
        table: bool,

        /// Table page to print (1-based)
        #[arg(long, default_value = "1")]
        page: usize,

        /// Table rows per page (10, 25 or 50)
        #[arg(long, default_value = "10")]
        page_size: usize,

        /// Rows shown per chart
        #[arg(long, default_value = "10")]
        max_rows: usize,
    },

    /// Write the (filtered) records as a canonical JSON array
    Export {
        #[command(flatten)]
        source: SourceOpts,

        #[command(flatten)]
        filter: FilterOpts,

        /// Output path
        #[arg(short, long, default_value = DEFAULT_EXPORT_FILE)]
        output: PathBuf,
    },

    /// List the distinct values of one record field
    Values {
        #[command(flatten)]
        source: SourceOpts,

        /// Field name, e.g. pop, status, xCache
        #[arg(long)]
        field: String,
    },

    /// Show the dashboard layout
    Layout {
        /// Layout file
        #[arg(long, env = "CACHE_ANALYZER_LAYOUT", default_value = DEFAULT_LAYOUT_FILE)]
        file: PathBuf,

        /// Overwrite the file with the default layout
        #[arg(long)]
        reset: bool,
    },

    /// Validate an analysis report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Analyze {
            source,
            filter,
            layout,
            output,
            table,
            page,
            page_size,
            max_rows,
        } => {
            let (source, fetch_timeout) = source.resolve()?;

            let args = AnalyzeArgs {
                source,
                filters: filter.filters,
                filter_file: filter.filter_file,
                layout,
                output_json: output,
                show_table: table,
                page: page.saturating_sub(1),
                page_size,
                max_rows,
                fetch_timeout,
            };

            // Validate args first
            validate_args(&args)?;

            execute_analyze(args)?;
        }

        Commands::Export {
            source,
            filter,
            output,
        } => {
            let (source, fetch_timeout) = source.resolve()?;

            execute_export(ExportArgs {
                source,
                filters: filter.filters,
                filter_file: filter.filter_file,
                output,
                fetch_timeout,
            })?;
        }

        Commands::Values { source, field } => {
            let (source, fetch_timeout) = source.resolve()?;
            list_values(&source, &field, fetch_timeout)?;
        }

        Commands::Layout { file, reset } => {
            show_layout(&file, reset)?;
        }

        Commands::Validate { file } => {
            validate_report_file(&file)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
