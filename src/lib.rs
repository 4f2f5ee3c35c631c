//! Cache Analyzer
//!
//! CDN cache behaviour analysis for captured network traffic.
//!
//! Captures (browser HAR exports or JSON arrays of request records) are
//! normalized into canonical request records, filtered with a multi-field
//! filter specification, and aggregated by cache status, POP or domain into
//! ordered count and byte-sum tables for charting.
//!
//! ## Getting Started
//!
//! ```bash
//! cache-analyzer analyze --input capture.har --filter status=200
//! cache-analyzer --help
//! ```
//!
//! Library use goes through three steps:
//!
//! ```ignore
//! let records = cache_analyzer::parser::normalize(&payload)?;
//! let filtered = cache_analyzer::aggregator::filter_records(&records, &spec);
//! let groups = cache_analyzer::aggregator::group_by(&filtered, Dimension::CacheStatus);
//! let sizes = cache_analyzer::aggregator::aggregate(&groups, Metric::SizeSum);
//! ```

pub mod aggregator;
pub mod commands;
pub mod dashboard;
pub mod fetch;
pub mod output;
pub mod parser;
pub mod utils;
