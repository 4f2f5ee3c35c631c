//! Shared input handling for commands: where records come from and which filter applies.

use crate::aggregator::{parse_arg, FilterSpec};
use crate::fetch::import_url;
use crate::parser::{import_file, RequestRecord};
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Where to import records from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Local HAR or JSON array file
    File(PathBuf),
    /// URL returning a HAR document or JSON array
    Url(String),
}

impl InputSource {
    /// Pick the source from mutually exclusive CLI options
    pub fn from_options(input: Option<PathBuf>, url: Option<String>) -> Result<Self> {
        match (input, url) {
            (Some(path), None) => Ok(Self::File(path)),
            (None, Some(url)) => Ok(Self::Url(url)),
            (Some(_), Some(_)) => anyhow::bail!("Use either --input or --url, not both"),
            (None, None) => anyhow::bail!("An input is required: pass --input <file> or --url <url>"),
        }
    }

    /// Import and normalize the records
    pub fn load(&self, fetch_timeout: Duration) -> Result<Vec<RequestRecord>> {
        let records = match self {
            Self::File(path) => import_file(path)
                .with_context(|| format!("Failed to import {}", path.display()))?,
            Self::Url(url) => import_url(url, fetch_timeout)?,
        };

        info!("Imported {} records from {}", records.len(), self);
        Ok(records)
    }
}

impl std::fmt::Display for InputSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// Combine a filter file (if any) with `field=value` arguments
///
/// Arguments add accepted values on top of what the file specifies.
pub fn build_filter(args: &[String], filter_file: Option<&Path>) -> Result<FilterSpec> {
    let mut spec = match filter_file {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read filter file {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Filter file {} is not a JSON object", path.display()))?
        }
        None => FilterSpec::new(),
    };

    for arg in args {
        let (field, values) = parse_arg(arg)?;
        for value in values {
            spec.accept(field.clone(), value);
        }
    }

    debug!("Filter: {}", serde_json::to_string(&spec).unwrap_or_default());
    Ok(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_source_requires_exactly_one_option() {
        assert!(InputSource::from_options(None, None).is_err());
        assert!(InputSource::from_options(Some("a.har".into()), Some("https://x".into())).is_err());
        assert_eq!(
            InputSource::from_options(None, Some("https://x".into())).unwrap(),
            InputSource::Url("https://x".to_string())
        );
    }

    #[test]
    fn test_build_filter_merges_file_and_args() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), r#"{"status": 200}"#).unwrap();

        let spec = build_filter(&["status=304".to_string()], Some(file.path())).unwrap();

        assert_eq!(
            serde_json::to_value(&spec).unwrap(),
            json!({"status": [200, 304]})
        );
    }

    #[test]
    fn test_build_filter_rejects_malformed_argument() {
        assert!(build_filter(&["status".to_string()], None).is_err());
    }
}
