//! Configuration and constants for the analyzer.

use std::time::Duration;

/// Default timeout for fetching a capture over HTTP
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Current analysis report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Group key used when a dimension value is missing or unparsable
pub const UNKNOWN_KEY: &str = "unknown";

// Response header names (lower-cased) consulted during HAR normalization.
// For POP, earlier names take priority over later ones.
pub const CACHE_CONTROL_HEADER: &str = "cache-control";
pub const X_CACHE_HEADER: &str = "x-cache";
pub const POP_HEADER_NAMES: &[&str] = &["x-amz-cf-pop", "x-served-by"];

// Cache-Control directives that mark a response as never served from cache
pub const UNCACHEABLE_DIRECTIVES: &[&str] = &["no-store", "no-cache", "private"];

/// File name used by `export` when no output path is given
pub const DEFAULT_EXPORT_FILE: &str = "network-analysis.json";

/// File name used for the dashboard layout when no path is given
pub const DEFAULT_LAYOUT_FILE: &str = "dashboard-layout.json";

/// Page sizes offered by the record table
pub const TABLE_PAGE_SIZES: &[usize] = &[10, 25, 50];
