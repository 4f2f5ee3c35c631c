//! Filtering and aggregation over canonical request records.
//!
//! This module turns a record set into:
//! - Filtered subsets (multi-field accepted-value constraints)
//! - Partitions by cache status, POP or domain
//! - Ordered per-group counts and byte sums for charting
//!
//! Every operation here is a pure function and never fails.

pub mod filter;
pub mod grouping;
pub mod metrics;

// Re-export main types and functions
pub use filter::{distinct_values, filter_records, parse_arg, AcceptedValues, FilterSpec};
pub use grouping::{domain_of, group_by, CacheStatus, Dimension, Grouping};
pub use metrics::{
    aggregate, aggregate_by, breakdown, summarize, AggregateResult, AggregateRow, Breakdown,
    Metric, TrafficSummary,
};
