//! Paginated text table of request records.
//!
//! Column order is owned here, not by the record type.

use crate::dashboard::format_bytes;
use crate::parser::schema::{RecordField, RequestRecord};

/// One table column: record field, header, display width
pub struct Column {
    pub field: RecordField,
    pub header: &'static str,
    pub width: usize,
}

/// Display order of the record table
pub const COLUMNS: &[Column] = &[
    Column { field: RecordField::Method, header: "Method", width: 7 },
    Column { field: RecordField::Url, header: "URL", width: 48 },
    Column { field: RecordField::CacheControl, header: "Cache Control", width: 22 },
    Column { field: RecordField::XCache, header: "X-Cache", width: 22 },
    Column { field: RecordField::Pop, header: "POP", width: 10 },
    Column { field: RecordField::TimeSeconds, header: "Time (s)", width: 9 },
    Column { field: RecordField::SizeBytes, header: "Size (bytes)", width: 12 },
    Column { field: RecordField::Status, header: "Status", width: 6 },
    Column { field: RecordField::FulfilledBy, header: "Fulfilled By", width: 14 },
];

/// Number of pages needed for `total` rows
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

fn cell(record: &RequestRecord, field: RecordField) -> String {
    let text = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());

    match field {
        RecordField::Method => record.method.clone(),
        RecordField::Url => record.url.clone(),
        RecordField::CacheControl => text(&record.cache_control),
        RecordField::XCache => text(&record.x_cache),
        RecordField::Pop => text(&record.pop),
        RecordField::TimeSeconds => format!("{:.3}", record.time_seconds),
        RecordField::SizeBytes => record.size_bytes.to_string(),
        RecordField::Status => record.status.to_string(),
        RecordField::FulfilledBy => text(&record.fulfilled_by),
    }
}

fn fit(value: &str, width: usize) -> String {
    if value.chars().count() > width {
        let head: String = value.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", head)
    } else {
        value.to_string()
    }
}

/// Render one page (zero-based) of `records`
pub fn render_table(records: &[RequestRecord], page: usize, page_size: usize) -> String {
    let mut lines = Vec::new();

    let header: Vec<String> = COLUMNS
        .iter()
        .map(|c| format!("{:<w$}", c.header, w = c.width))
        .collect();
    lines.push(header.join(" │ "));
    lines.push(
        COLUMNS
            .iter()
            .map(|c| "─".repeat(c.width))
            .collect::<Vec<_>>()
            .join("─┼─"),
    );

    let start = page.saturating_mul(page_size).min(records.len());
    let end = start.saturating_add(page_size).min(records.len());

    for record in &records[start..end] {
        let row: Vec<String> = COLUMNS
            .iter()
            .map(|c| {
                let value = fit(&cell(record, c.field), c.width);
                if c.field.is_numeric() {
                    format!("{:>w$}", value, w = c.width)
                } else {
                    format!("{:<w$}", value, w = c.width)
                }
            })
            .collect();
        lines.push(row.join(" │ "));
    }

    let pages = page_count(records.len(), page_size);
    let shown_bytes = records[start..end]
        .iter()
        .map(|r| r.size_bytes)
        .fold(0, i64::saturating_add);
    lines.push(format!(
        "Rows {}-{} of {} | page {}/{} | {} on this page",
        if end > start { start + 1 } else { 0 },
        if end > start { end } else { 0 },
        records.len(),
        if pages == 0 { 0 } else { page + 1 },
        pages,
        format_bytes(shown_bytes)
    ));

    lines.join("\n")
}
