//! Small read-only commands: distinct values, layout, report validation, version.

use super::source::InputSource;
use crate::aggregator::distinct_values;
use crate::dashboard::{default_layout, load_layout, save_layout};
use crate::output::read_report;
use crate::parser::RecordField;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::{Context, Result};
use std::path::Path;
use std::time::Duration;

/// Print the distinct values a field takes (the choices a filter can offer)
pub fn list_values(source: &InputSource, field_name: &str, fetch_timeout: Duration) -> Result<()> {
    let field = RecordField::from_name(field_name).with_context(|| {
        let known: Vec<&str> = RecordField::ALL.iter().map(|f| f.name()).collect();
        format!("Unknown field '{}' (expected one of: {})", field_name, known.join(", "))
    })?;

    let records = source.load(fetch_timeout)?;
    let values = distinct_values(&records, field);

    println!("{} distinct value(s) of {}:", values.len(), field);
    for value in values {
        println!("  {}", value);
    }

    Ok(())
}

/// Show the dashboard layout, or reset it to the default
pub fn show_layout(path: &Path, reset: bool) -> Result<()> {
    let panels = if reset {
        let panels = default_layout();
        save_layout(path, &panels)
            .with_context(|| format!("Failed to save layout {}", path.display()))?;
        println!("✓ Default layout written to: {}", path.display());
        panels
    } else {
        load_layout(path).with_context(|| format!("Failed to load layout {}", path.display()))?
    };

    println!("{:<20} {:<18} {:>3} {:>3} {:>5} {:>6}", "ID", "TYPE", "X", "Y", "WIDTH", "HEIGHT");
    for panel in &panels {
        println!(
            "{:<20} {:<18} {:>3} {:>3} {:>5} {:>6}",
            panel.id,
            panel.panel_type.as_str(),
            panel.x,
            panel.y,
            panel.width,
            panel.height
        );
    }

    Ok(())
}

/// Validate an analysis report JSON file
pub fn validate_report_file(path: &Path) -> Result<()> {
    println!("Validating report: {}", path.display());

    let report = read_report(path)?;

    println!("✓ Valid report JSON");
    println!("  Version: {}", report.version);
    println!("  Source: {}", report.source);
    println!("  Generated: {}", report.generated_at);
    println!("  Records: {} of {}", report.filtered_records, report.total_records);
    println!("  Panels: {}", report.panels.len());

    if report.filter.is_empty() {
        println!("  Filter: none");
    } else {
        println!("  Filter:");
        for (field, accepted) in report.filter.iter() {
            let values = serde_json::to_string(accepted).unwrap_or_default();
            println!("    {} = {}", field, values);
        }
    }

    if report.version != SCHEMA_VERSION {
        println!("  ⚠ Schema version differs from current ({})", SCHEMA_VERSION);
    }

    Ok(())
}

/// Display version information
pub fn display_version() {
    println!("Cache Analyzer v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("CDN cache behaviour analysis for HAR captures and HTTP request logs.");
}
