//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.
//!
//! The filtering and aggregation engine has no error type: every engine
//! operation is total.

use thiserror::Error;

/// Errors that can occur while importing a capture
#[derive(Error, Debug)]
pub enum ImportError {
    /// Payload is neither a HAR document nor a JSON array.
    /// Terminal: nothing is imported and the caller has to ask for new input.
    #[error("Unrecognized payload shape: expected a HAR document or a JSON array of requests")]
    UnrecognizedShape,

    #[error("Input is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while fetching a capture over HTTP
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unexpected HTTP status {status} from {url}")]
    BadStatus { status: u16, url: String },
}

/// Errors produced when building a filter from command-line arguments
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FilterError {
    #[error("Filter must look like field=value[,value...]: {0}")]
    MalformedArgument(String),
}

/// Errors that can occur while loading or saving a dashboard layout
#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Failed to access layout file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Layout file is not a valid panel list: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
