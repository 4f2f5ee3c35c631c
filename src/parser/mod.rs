//! Capture parsing and record normalization.
//!
//! This module handles:
//! - Detecting the payload shape (HAR document or record array)
//! - Case-insensitive response header extraction
//! - Lenient coercion into the canonical `RequestRecord`

mod coerce;
pub mod har;
pub mod normalize;
pub mod schema;

// Re-export main types
pub use har::{HarEntry, HeaderMap};
pub use normalize::{detect_shape, import_file, normalize, parse_payload, PayloadShape};
pub use schema::{FieldValue, RecordField, RequestRecord};
