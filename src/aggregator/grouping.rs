//! Partition records by a categorical dimension.
//!
//! Every record lands in exactly one group. Records without a value for the
//! dimension are grouped under an explicit "unknown" key, never dropped.

use crate::parser::schema::RequestRecord;
use crate::utils::config::{UNCACHEABLE_DIRECTIVES, UNKNOWN_KEY};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

/// Grouped records, keyed by dimension value
pub type Grouping<'a> = BTreeMap<String, Vec<&'a RequestRecord>>;

/// Categorical attribute used to partition records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    CacheStatus,
    Pop,
    Domain,
}

impl Dimension {
    /// Group key of `record` under this dimension
    pub fn key_for(self, record: &RequestRecord) -> String {
        match self {
            Self::CacheStatus => CacheStatus::classify(record).as_str().to_string(),
            Self::Pop => record
                .pop
                .clone()
                .unwrap_or_else(|| UNKNOWN_KEY.to_string()),
            Self::Domain => domain_of(&record.url).unwrap_or_else(|| UNKNOWN_KEY.to_string()),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::CacheStatus => "cache status",
            Self::Pop => "POP",
            Self::Domain => "domain",
        }
    }
}

/// Cache outcome of a single request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CacheStatus {
    Hit,
    Miss,
    Unknown,
}

impl CacheStatus {
    /// Classify a record; total, every record gets exactly one status.
    ///
    /// `X-Cache` decides when present: a case-insensitive "hit" substring
    /// wins over "miss", anything else is `Unknown`. Only when `X-Cache` is
    /// missing does `Cache-Control` count, and only to mark responses that
    /// can never be served from cache as `Miss`.
    pub fn classify(record: &RequestRecord) -> Self {
        if let Some(x_cache) = record.x_cache.as_deref() {
            let x_cache = x_cache.to_ascii_lowercase();
            return if x_cache.contains("hit") {
                Self::Hit
            } else if x_cache.contains("miss") {
                Self::Miss
            } else {
                Self::Unknown
            };
        }

        match record.cache_control.as_deref() {
            Some(cache_control) if is_uncacheable(cache_control) => Self::Miss,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hit => "Hit",
            Self::Miss => "Miss",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_uncacheable(cache_control: &str) -> bool {
    cache_control
        .split(',')
        .map(|directive| directive.trim().to_ascii_lowercase())
        .any(|directive| UNCACHEABLE_DIRECTIVES.contains(&directive.as_str()))
}

/// Host component of `url`; `None` when it does not parse or has no host
pub fn domain_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    parsed
        .host_str()
        .filter(|host| !host.is_empty())
        .map(str::to_string)
}

/// Partition `records` by `dimension`
///
/// **Public** - main entry point for grouping
///
/// Group member order follows input order.
pub fn group_by<'a, I>(records: I, dimension: Dimension) -> Grouping<'a>
where
    I: IntoIterator<Item = &'a RequestRecord>,
{
    let mut groups: Grouping<'a> = BTreeMap::new();

    for record in records {
        groups
            .entry(dimension.key_for(record))
            .or_default()
            .push(record);
    }

    groups
}
