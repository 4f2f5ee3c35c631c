//! Analysis report schema.
//!
//! This is the structure of report JSON files we write to disk.
//! Schema is versioned to allow future evolution.

use crate::aggregator::{FilterSpec, TrafficSummary};
use crate::dashboard::PanelData;
use crate::utils::config::SCHEMA_VERSION;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Top-level report written by `analyze --output`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// File path or URL the records were imported from
    pub source: String,

    /// Timestamp when the report was generated (RFC 3339, UTC)
    pub generated_at: String,

    /// Records imported before filtering
    pub total_records: usize,

    /// Records left after filtering
    pub filtered_records: usize,

    /// Filter the panels were computed under
    pub filter: FilterSpec,

    pub summary: TrafficSummary,

    pub panels: Vec<PanelData>,
}

impl AnalysisReport {
    pub fn new(
        source: impl Into<String>,
        total_records: usize,
        filter: FilterSpec,
        summary: TrafficSummary,
        panels: Vec<PanelData>,
    ) -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            source: source.into(),
            generated_at: Utc::now().to_rfc3339(),
            total_records,
            filtered_records: summary.total_requests,
            filter,
            summary,
            panels,
        }
    }
}
