//! Per-group metrics and traffic summary statistics.
//!
//! Aggregate rows drive chart rendering order, so ordering is fixed:
//! descending by value, ties broken by ascending key.

use super::grouping::{group_by, CacheStatus, Dimension, Grouping};
use crate::parser::schema::RequestRecord;
use crate::utils::config::UNKNOWN_KEY;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Scalar computed per group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    /// Number of records in the group
    Count,
    /// Sum of `size_bytes` over the group
    SizeSum,
}

impl Metric {
    /// Value of this metric over one group
    pub fn evaluate(self, records: &[&RequestRecord]) -> i64 {
        match self {
            Self::Count => records.len() as i64,
            Self::SizeSum => records
                .iter()
                .map(|r| r.size_bytes)
                .fold(0, i64::saturating_add),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Count => "requests",
            Self::SizeSum => "bytes",
        }
    }
}

/// One (key, value) pair of an aggregate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateRow {
    pub key: String,
    pub value: i64,
}

/// Ordered aggregate over a grouping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub metric: Metric,
    pub rows: Vec<AggregateRow>,
}

impl AggregateResult {
    /// Sum of all row values, saturating at the `i64` bounds
    pub fn total(&self) -> i64 {
        self.rows.iter().map(|row| row.value).fold(0, i64::saturating_add)
    }

    pub fn get(&self, key: &str) -> Option<i64> {
        self.rows.iter().find(|row| row.key == key).map(|row| row.value)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Compute `metric` for every group
///
/// **Public** - main entry point for metric calculation
///
/// Does not consume the grouping, so one grouping can be aggregated with
/// several metrics.
pub fn aggregate(groups: &Grouping<'_>, metric: Metric) -> AggregateResult {
    let mut rows: Vec<AggregateRow> = groups
        .iter()
        .map(|(key, records)| AggregateRow {
            key: key.clone(),
            value: metric.evaluate(records),
        })
        .collect();

    sort_rows(&mut rows);

    AggregateResult { metric, rows }
}

/// Group then aggregate in one call
pub fn aggregate_by(records: &[RequestRecord], dimension: Dimension, metric: Metric) -> AggregateResult {
    aggregate(&group_by(records, dimension), metric)
}

/// Descending by value, then ascending by key
fn sort_rows(rows: &mut [AggregateRow]) {
    rows.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.key.cmp(&b.key)));
}

/// One primary group split along a secondary dimension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakdown {
    pub key: String,
    pub total: i64,
    pub rows: Vec<AggregateRow>,
}

/// Split every group of `groups` by `secondary` and aggregate each split
///
/// Breakdowns follow the primary aggregate order (largest total first).
pub fn breakdown(groups: &Grouping<'_>, secondary: Dimension, metric: Metric) -> Vec<Breakdown> {
    let primary = aggregate(groups, metric);

    primary
        .rows
        .into_iter()
        .map(|row| {
            let members = groups.get(&row.key).map_or(&[][..], Vec::as_slice);
            let split = aggregate(&group_by(members.iter().copied(), secondary), metric);
            Breakdown {
                key: row.key,
                total: row.value,
                rows: split.rows,
            }
        })
        .collect()
}

/// Headline numbers for a record set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrafficSummary {
    pub total_requests: usize,
    pub total_bytes: i64,
    pub hits: usize,
    pub misses: usize,
    pub unknown: usize,
    /// hits / (hits + misses), 0 when neither was observed
    pub hit_ratio: f64,
    pub mean_time_seconds: f64,
    pub distinct_domains: usize,
    pub distinct_pops: usize,
}

impl TrafficSummary {
    /// Human-readable one-liner for logging
    pub fn summary(&self) -> String {
        format!(
            "Requests: {} | Bytes: {} | Hit: {} | Miss: {} | Unknown: {} | Hit ratio: {:.1}% | Domains: {} | POPs: {}",
            self.total_requests,
            self.total_bytes,
            self.hits,
            self.misses,
            self.unknown,
            self.hit_ratio * 100.0,
            self.distinct_domains,
            self.distinct_pops
        )
    }
}

/// Compute summary statistics over `records`
pub fn summarize(records: &[RequestRecord]) -> TrafficSummary {
    if records.is_empty() {
        return TrafficSummary::default();
    }

    let mut summary = TrafficSummary {
        total_requests: records.len(),
        ..Default::default()
    };
    let mut domains = BTreeSet::new();
    let mut pops = BTreeSet::new();
    let mut total_time = 0.0;

    for record in records {
        summary.total_bytes = summary.total_bytes.saturating_add(record.size_bytes);
        total_time += record.time_seconds;

        match CacheStatus::classify(record) {
            CacheStatus::Hit => summary.hits += 1,
            CacheStatus::Miss => summary.misses += 1,
            CacheStatus::Unknown => summary.unknown += 1,
        }

        let domain = Dimension::Domain.key_for(record);
        if domain != UNKNOWN_KEY {
            domains.insert(domain);
        }
        if let Some(pop) = record.pop.as_deref() {
            pops.insert(pop);
        }
    }

    let decided = summary.hits + summary.misses;
    if decided > 0 {
        summary.hit_ratio = summary.hits as f64 / decided as f64;
    }
    summary.mean_time_seconds = total_time / records.len() as f64;
    summary.distinct_domains = domains.len();
    summary.distinct_pops = pops.len();

    debug!("Traffic summary: {}", summary.summary());

    summary
}
