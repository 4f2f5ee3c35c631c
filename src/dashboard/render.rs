//! Terminal rendering of dashboard panels as horizontal bar charts.

use super::panels::PanelData;
use crate::aggregator::{AggregateRow, Metric, TrafficSummary};

const BAR_WIDTH: usize = 40;
const KEY_WIDTH: usize = 32;

/// Human-readable byte count (binary units)
pub fn format_bytes(bytes: i64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value.abs() >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

fn format_value(value: i64, metric: Metric) -> String {
    match metric {
        Metric::Count => value.to_string(),
        Metric::SizeSum => format_bytes(value),
    }
}

fn truncate_key(key: &str) -> String {
    if key.chars().count() > KEY_WIDTH {
        let head: String = key.chars().take(KEY_WIDTH - 3).collect();
        format!("{}...", head)
    } else {
        key.to_string()
    }
}

fn bar(value: i64, max: i64) -> String {
    if max <= 0 || value <= 0 {
        return String::new();
    }
    let len = ((value as f64 / max as f64) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(len.max(1))
}

fn render_rows(lines: &mut Vec<String>, rows: &[AggregateRow], metric: Metric, max_rows: usize) {
    let max = rows.iter().map(|row| row.value).max().unwrap_or(0);
    let total = rows.iter().map(|row| row.value).fold(0, i64::saturating_add);

    for row in rows.iter().take(max_rows) {
        let percentage = if total > 0 {
            (row.value as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        lines.push(format!(
            "  {:<kw$} {:<bw$} {:>10} {:>5.1}%",
            truncate_key(&row.key),
            bar(row.value, max),
            format_value(row.value, metric),
            percentage,
            kw = KEY_WIDTH,
            bw = BAR_WIDTH,
        ));
    }

    if rows.len() > max_rows {
        lines.push(format!("  ... {} more", rows.len() - max_rows));
    }
}

/// Render one panel
///
/// Panels with a breakdown list each primary key followed by its split.
pub fn render_panel(panel: &PanelData, max_rows: usize) -> String {
    let mut lines = vec![
        format!("▶ {} ({})", panel.title, panel.metric.label()),
        format!("  {}", "─".repeat(KEY_WIDTH + BAR_WIDTH + 19)),
    ];

    if panel.rows.is_empty() {
        lines.push("  (no data)".to_string());
        return lines.join("\n");
    }

    if panel.breakdown.is_empty() {
        render_rows(&mut lines, &panel.rows, panel.metric, max_rows);
    } else {
        for split in panel.breakdown.iter().take(max_rows) {
            let parts: Vec<String> = split
                .rows
                .iter()
                .map(|row| format!("{} {}", row.key, format_value(row.value, panel.metric)))
                .collect();
            lines.push(format!(
                "  {:<kw$} {:>10}  {}",
                truncate_key(&split.key),
                format_value(split.total, panel.metric),
                parts.join(" / "),
                kw = KEY_WIDTH,
            ));
        }
        if panel.breakdown.len() > max_rows {
            lines.push(format!("  ... {} more", panel.breakdown.len() - max_rows));
        }
    }

    lines.join("\n")
}

/// Render every panel, separated by blank lines
pub fn render_dashboard(panels: &[PanelData], max_rows: usize) -> String {
    panels
        .iter()
        .map(|panel| render_panel(panel, max_rows))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Headline block printed above the charts
pub fn render_summary(summary: &TrafficSummary, total_records: usize) -> String {
    [
        "=".repeat(80),
        "CACHE SUMMARY".to_string(),
        "=".repeat(80),
        format!("Requests:     {} (of {} imported)", summary.total_requests, total_records),
        format!("Transferred:  {}", format_bytes(summary.total_bytes)),
        format!(
            "Cache:        {} hit / {} miss / {} unknown ({:.1}% hit ratio)",
            summary.hits,
            summary.misses,
            summary.unknown,
            summary.hit_ratio * 100.0
        ),
        format!("Mean time:    {:.3}s", summary.mean_time_seconds),
        format!(
            "Domains:      {}    POPs: {}",
            summary.distinct_domains, summary.distinct_pops
        ),
        "=".repeat(80),
    ]
    .join("\n")
}
