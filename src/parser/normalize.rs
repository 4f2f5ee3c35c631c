//! Payload normalization into canonical request records.
//!
//! Two payload shapes are recognized:
//! - a HAR document (`{"log": {"entries": [...]}}`)
//! - a flat JSON array of request records (canonical or legacy field names)
//!
//! Anything else is rejected as a whole; there is no partial import.

use super::coerce::{to_f64, to_i64, to_status, to_text};
use super::har::HarEntry;
use super::schema::{RecordField, RequestRecord, LEGACY_TIME_MS_KEY};
use crate::utils::error::ImportError;
use log::{debug, warn};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Detected payload shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    /// HAR capture document
    Har,
    /// Array of already-flat request records
    RecordArray,
}

/// Work out which import shape a payload has
///
/// Returns `None` when the payload is neither shape.
pub fn detect_shape(payload: &Value) -> Option<PayloadShape> {
    match payload {
        Value::Object(obj) => {
            let has_entries = obj
                .get("log")
                .and_then(|log| log.get("entries"))
                .is_some_and(Value::is_array);
            has_entries.then_some(PayloadShape::Har)
        }
        Value::Array(_) => Some(PayloadShape::RecordArray),
        _ => None,
    }
}

/// Normalize a parsed JSON payload into request records
///
/// **Public** - main entry point of the import path
///
/// Output order matches input order. Nothing is deduplicated or dropped:
/// an element that cannot be read still yields a (default) record.
///
/// # Errors
/// * `ImportError::UnrecognizedShape` - payload is neither a HAR document nor an array
pub fn normalize(payload: &Value) -> Result<Vec<RequestRecord>, ImportError> {
    let records = match detect_shape(payload) {
        Some(PayloadShape::Har) => {
            let entries = payload["log"]["entries"].as_array().map_or(&[][..], Vec::as_slice);
            debug!("Normalizing HAR document with {} entries", entries.len());
            entries.iter().enumerate().map(|(i, e)| har_entry_record(i, e)).collect()
        }
        Some(PayloadShape::RecordArray) => {
            let items = payload.as_array().map_or(&[][..], Vec::as_slice);
            debug!("Normalizing record array with {} elements", items.len());
            items.iter().enumerate().map(|(i, item)| flat_record(i, item)).collect()
        }
        None => return Err(ImportError::UnrecognizedShape),
    };

    Ok(records)
}

/// Parse JSON text and normalize it
pub fn parse_payload(text: &str) -> Result<Vec<RequestRecord>, ImportError> {
    let payload: Value = serde_json::from_str(text)?;
    normalize(&payload)
}

/// Read a capture file (HAR or JSON array) from disk and normalize it
pub fn import_file(path: impl AsRef<Path>) -> Result<Vec<RequestRecord>, ImportError> {
    let path = path.as_ref();
    debug!("Reading capture from: {}", path.display());

    let text = fs::read_to_string(path)?;
    parse_payload(&text)
}

/// Convert one HAR entry, falling back to an empty record when it is unreadable
fn har_entry_record(index: usize, entry: &Value) -> RequestRecord {
    match serde_json::from_value::<HarEntry>(entry.clone()) {
        Ok(entry) => entry.to_record(),
        Err(e) => {
            warn!("HAR entry {} is malformed ({}), importing empty record", index, e);
            RequestRecord::default()
        }
    }
}

/// Convert one element of a flat record array
fn flat_record(index: usize, item: &Value) -> RequestRecord {
    let Some(obj) = item.as_object() else {
        warn!("Record {} is not a JSON object, importing empty record", index);
        return RequestRecord::default();
    };

    RequestRecord {
        method: text_field(obj, RecordField::Method).unwrap_or_default(),
        url: text_field(obj, RecordField::Url).unwrap_or_default(),
        cache_control: text_field(obj, RecordField::CacheControl),
        x_cache: text_field(obj, RecordField::XCache),
        pop: text_field(obj, RecordField::Pop),
        time_seconds: time_seconds(obj),
        size_bytes: to_i64(lookup(obj, RecordField::SizeBytes)),
        status: to_status(lookup(obj, RecordField::Status)),
        fulfilled_by: text_field(obj, RecordField::FulfilledBy),
    }
}

/// First non-null value stored under any spelling of `field`, with the key it was found under
fn lookup_named<'a>(
    obj: &'a Map<String, Value>,
    field: RecordField,
) -> Option<(&'static str, &'a Value)> {
    field
        .aliases()
        .iter()
        .filter_map(|name| obj.get(*name).map(|value| (*name, value)))
        .find(|(_, value)| !value.is_null())
}

fn lookup(obj: &Map<String, Value>, field: RecordField) -> Option<&Value> {
    lookup_named(obj, field).map(|(_, value)| value)
}

/// Canonical keys are seconds; the legacy column is milliseconds
fn time_seconds(obj: &Map<String, Value>) -> f64 {
    match lookup_named(obj, RecordField::TimeSeconds) {
        Some((LEGACY_TIME_MS_KEY, value)) => to_f64(Some(value)) / 1000.0,
        Some((_, value)) => to_f64(Some(value)),
        None => 0.0,
    }
}

fn text_field(obj: &Map<String, Value>, field: RecordField) -> Option<String> {
    to_text(lookup(obj, field))
}
