//! HAR (HTTP Archive) capture documents.
//!
//! Only the parts of a HAR entry that feed a `RequestRecord` are modelled.
//! Scalar leaves are kept as raw JSON values and coerced leniently, since
//! exporters disagree on types (sizes as strings, `-1` sentinels, nulls).

use super::coerce::{to_f64, to_i64, to_status, to_text};
use super::schema::RequestRecord;
use crate::utils::config::{CACHE_CONTROL_HEADER, POP_HEADER_NAMES, X_CACHE_HEADER};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;

/// A single `log.entries[]` element
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HarEntry {
    #[serde(default, deserialize_with = "lenient")]
    pub request: HarRequest,

    #[serde(default, deserialize_with = "lenient")]
    pub response: HarResponse,

    /// Total elapsed time in milliseconds
    #[serde(default)]
    pub time: Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HarRequest {
    #[serde(default)]
    pub method: Value,

    #[serde(default)]
    pub url: Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HarResponse {
    #[serde(default)]
    pub status: Value,

    #[serde(default, deserialize_with = "lenient_list")]
    pub headers: Vec<HarHeader>,

    #[serde(default, deserialize_with = "lenient")]
    pub content: HarContent,

    /// Non-standard fulfillment marker some browsers add
    #[serde(default, rename = "_fulfilledBy")]
    pub fulfilled_by: Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HarHeader {
    #[serde(default)]
    pub name: Value,

    #[serde(default)]
    pub value: Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HarContent {
    #[serde(default)]
    pub size: Value,
}

/// Parse a sub-object, falling back to its default when it has the wrong shape
///
/// Keeps a broken `response` or `content` from discarding the rest of the entry.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Parse a list element by element; a non-array yields an empty list and
/// unreadable elements are skipped
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => return Ok(Vec::new()),
    };

    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

/// Response headers keyed by lower-cased name
///
/// Built in one pass per entry. When a name repeats, the first occurrence wins.
#[derive(Debug, Clone, Default)]
pub struct HeaderMap {
    headers: HashMap<String, String>,
}

impl HeaderMap {
    pub fn from_headers(headers: &[HarHeader]) -> Self {
        let mut map = HashMap::with_capacity(headers.len());

        for header in headers {
            let Some(name) = header.name.as_str() else {
                continue;
            };
            let Some(value) = to_text(Some(&header.value)) else {
                continue;
            };
            map.entry(name.to_ascii_lowercase()).or_insert(value);
        }

        Self { headers: map }
    }

    /// Case-insensitive header lookup
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Value of the first header in `names` that is present
    pub fn first_of(&self, names: &[&str]) -> Option<&str> {
        names.iter().find_map(|name| self.get(name))
    }
}

impl HarEntry {
    /// Convert the entry into a canonical record
    pub fn to_record(&self) -> RequestRecord {
        let headers = HeaderMap::from_headers(&self.response.headers);

        RequestRecord {
            method: to_text(Some(&self.request.method)).unwrap_or_default(),
            url: to_text(Some(&self.request.url)).unwrap_or_default(),
            cache_control: headers.get(CACHE_CONTROL_HEADER).map(str::to_string),
            x_cache: headers.get(X_CACHE_HEADER).map(str::to_string),
            pop: headers.first_of(POP_HEADER_NAMES).map(str::to_string),
            time_seconds: to_f64(Some(&self.time)) / 1000.0,
            size_bytes: to_i64(Some(&self.response.content.size)),
            status: to_status(Some(&self.response.status)),
            fulfilled_by: to_text(Some(&self.response.fulfilled_by)),
        }
    }
}
