//! Canonical request record definitions.
//!
//! Every import shape is normalized into `RequestRecord` before any
//! filtering or aggregation happens. Records are created once at import
//! time and never mutated afterwards.

use serde::Serialize;

/// One observed HTTP exchange
///
/// Optional header-derived fields use `None` for "header missing", which is
/// distinct from `Some("")` ("header present with a blank value").
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestRecord {
    /// HTTP method
    pub method: String,

    /// Full request URL
    pub url: String,

    /// Raw `Cache-Control` response header
    pub cache_control: Option<String>,

    /// Raw `X-Cache` response header (hit/miss signal)
    pub x_cache: Option<String>,

    /// CDN point-of-presence code
    pub pop: Option<String>,

    /// Elapsed request time in seconds
    pub time_seconds: f64,

    /// Response content size in bytes
    pub size_bytes: i64,

    /// HTTP status code
    pub status: u16,

    /// Upstream/edge fulfillment identifier
    pub fulfilled_by: Option<String>,
}

/// Legacy numbered column for request time; it holds HAR milliseconds,
/// unlike the canonical `timeSeconds`
pub const LEGACY_TIME_MS_KEY: &str = "5.time";

/// Named fields of a `RequestRecord`
///
/// Used wherever fields are addressed by user-supplied names: filter
/// specifications, distinct-value listings and legacy record imports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordField {
    Method,
    Url,
    CacheControl,
    XCache,
    Pop,
    TimeSeconds,
    SizeBytes,
    Status,
    FulfilledBy,
}

impl RecordField {
    pub const ALL: [RecordField; 9] = [
        Self::Method,
        Self::Url,
        Self::CacheControl,
        Self::XCache,
        Self::Pop,
        Self::TimeSeconds,
        Self::SizeBytes,
        Self::Status,
        Self::FulfilledBy,
    ];

    /// Canonical (serialized) field name
    pub fn name(self) -> &'static str {
        self.aliases()[0]
    }

    /// Every accepted spelling: canonical camelCase first, then snake_case,
    /// then the numbered column names written by older exports.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Method => &["method", "1.method"],
            Self::Url => &["url", "2.url"],
            Self::CacheControl => &["cacheControl", "cache_control", "3.cache-control"],
            Self::XCache => &["xCache", "x_cache", "4.x-cache"],
            Self::Pop => &["pop", "5.x-amz-cf-pop"],
            Self::TimeSeconds => &["timeSeconds", "time_seconds", LEGACY_TIME_MS_KEY],
            Self::SizeBytes => &["sizeBytes", "size_bytes", "6.size"],
            Self::Status => &["status", "7.status"],
            Self::FulfilledBy => &["fulfilledBy", "fulfilled_by", "8.fulfilledBy"],
        }
    }

    /// Resolve a field from any of its accepted spellings
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.aliases().contains(&name))
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, Self::TimeSeconds | Self::SizeBytes | Self::Status)
    }
}

impl std::fmt::Display for RecordField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Borrowed view of a single field value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// Optional field with no value (header missing)
    Absent,
    Text(&'a str),
    Number(f64),
}

impl FieldValue<'_> {
    /// JSON form used by reports and filter specifications
    pub fn to_json(self) -> serde_json::Value {
        match self {
            Self::Absent => serde_json::Value::Null,
            Self::Text(s) => serde_json::Value::String(s.to_string()),
            // Integral numbers (status, size) stay integers in JSON
            Self::Number(n) if n.fract() == 0.0 && n.abs() < i64::MAX as f64 => {
                serde_json::Value::from(n as i64)
            }
            Self::Number(n) => serde_json::Number::from_f64(n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
        }
    }
}

impl RequestRecord {
    /// Read a field by name
    pub fn field(&self, field: RecordField) -> FieldValue<'_> {
        fn optional(value: &Option<String>) -> FieldValue<'_> {
            value.as_deref().map_or(FieldValue::Absent, FieldValue::Text)
        }

        match field {
            RecordField::Method => FieldValue::Text(&self.method),
            RecordField::Url => FieldValue::Text(&self.url),
            RecordField::CacheControl => optional(&self.cache_control),
            RecordField::XCache => optional(&self.x_cache),
            RecordField::Pop => optional(&self.pop),
            RecordField::TimeSeconds => FieldValue::Number(self.time_seconds),
            RecordField::SizeBytes => FieldValue::Number(self.size_bytes as f64),
            RecordField::Status => FieldValue::Number(f64::from(self.status)),
            RecordField::FulfilledBy => optional(&self.fulfilled_by),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_name_resolution() {
        assert_eq!(RecordField::from_name("xCache"), Some(RecordField::XCache));
        assert_eq!(RecordField::from_name("x_cache"), Some(RecordField::XCache));
        assert_eq!(RecordField::from_name("4.x-cache"), Some(RecordField::XCache));
        assert_eq!(RecordField::from_name("X-Cache"), None);
        assert_eq!(RecordField::from_name("colour"), None);
    }

    #[test]
    fn test_absent_is_not_empty() {
        let record = RequestRecord {
            x_cache: Some(String::new()),
            ..Default::default()
        };

        assert_eq!(record.field(RecordField::XCache), FieldValue::Text(""));
        assert_eq!(record.field(RecordField::Pop), FieldValue::Absent);
    }

    #[test]
    fn test_serializes_camel_case_with_explicit_nulls() {
        let record = RequestRecord {
            method: "GET".to_string(),
            url: "https://a.cdn/x".to_string(),
            status: 200,
            ..Default::default()
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["sizeBytes"], 0);
        assert!(json["xCache"].is_null());
        assert!(json.get("x_cache").is_none());
    }
}
