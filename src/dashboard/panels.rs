//! Dashboard panel definitions and persisted layout.
//!
//! A layout is a flat list of positioned panels. Each panel type maps to one
//! `(Dimension, Metric)` engine call; the engine itself never sees layouts.

use crate::aggregator::{
    aggregate, breakdown, group_by, AggregateRow, Breakdown, Dimension, Grouping, Metric,
};
use crate::parser::schema::RequestRecord;
use crate::utils::error::LayoutError;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Chart panel types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PanelKind {
    SizeByCache,
    RequestsByCache,
    SizeByPop,
    RequestsByPop,
    DomainCache,
    DomainRequests,
}

impl PanelKind {
    pub const ALL: [PanelKind; 6] = [
        Self::SizeByCache,
        Self::RequestsByCache,
        Self::SizeByPop,
        Self::RequestsByPop,
        Self::DomainCache,
        Self::DomainRequests,
    ];

    pub fn dimension(self) -> Dimension {
        match self {
            Self::SizeByCache | Self::RequestsByCache => Dimension::CacheStatus,
            Self::SizeByPop | Self::RequestsByPop => Dimension::Pop,
            Self::DomainCache | Self::DomainRequests => Dimension::Domain,
        }
    }

    pub fn metric(self) -> Metric {
        match self {
            Self::SizeByCache | Self::SizeByPop => Metric::SizeSum,
            _ => Metric::Count,
        }
    }

    /// Secondary dimension each group is split by, if any
    pub fn split(self) -> Option<Dimension> {
        match self {
            Self::DomainCache => Some(Dimension::CacheStatus),
            _ => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::SizeByCache => "Size by Cache Status",
            Self::RequestsByCache => "Requests by Cache Status",
            Self::SizeByPop => "Size by POP",
            Self::RequestsByPop => "Requests by POP",
            Self::DomainCache => "Cache Status by Domain",
            Self::DomainRequests => "Requests by Domain",
        }
    }

    /// Kebab-case identifier, as stored in layout files
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SizeByCache => "size-by-cache",
            Self::RequestsByCache => "requests-by-cache",
            Self::SizeByPop => "size-by-pop",
            Self::RequestsByPop => "requests-by-pop",
            Self::DomainCache => "domain-cache",
            Self::DomainRequests => "domain-requests",
        }
    }
}

/// Position and size of one panel on the dashboard grid
///
/// Older layout files use `i`, `w`, `h` and `type`; both spellings load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelConfig {
    #[serde(alias = "i")]
    pub id: String,
    pub x: u32,
    pub y: u32,
    #[serde(alias = "w")]
    pub width: u32,
    #[serde(alias = "h")]
    pub height: u32,
    #[serde(alias = "type")]
    pub panel_type: PanelKind,
}

impl PanelConfig {
    pub fn new(panel_type: PanelKind, x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            id: panel_type.as_str().to_string(),
            x,
            y,
            width,
            height,
            panel_type,
        }
    }
}

/// The six-panel layout used when nothing has been saved
pub fn default_layout() -> Vec<PanelConfig> {
    vec![
        PanelConfig::new(PanelKind::SizeByCache, 0, 0, 6, 2),
        PanelConfig::new(PanelKind::RequestsByCache, 6, 0, 6, 2),
        PanelConfig::new(PanelKind::SizeByPop, 0, 2, 6, 2),
        PanelConfig::new(PanelKind::RequestsByPop, 6, 2, 6, 2),
        PanelConfig::new(PanelKind::DomainCache, 0, 4, 12, 3),
        PanelConfig::new(PanelKind::DomainRequests, 0, 7, 12, 3),
    ]
}

/// Load a saved layout, falling back to the default when the file is missing
pub fn load_layout(path: impl AsRef<Path>) -> Result<Vec<PanelConfig>, LayoutError> {
    let path = path.as_ref();

    if !path.exists() {
        debug!("No layout at {}, using default layout", path.display());
        return Ok(default_layout());
    }

    let text = fs::read_to_string(path)?;
    let panels: Vec<PanelConfig> = serde_json::from_str(&text)?;
    debug!("Loaded {} panels from {}", panels.len(), path.display());

    Ok(panels)
}

/// Persist a layout as a JSON array
pub fn save_layout(path: impl AsRef<Path>, panels: &[PanelConfig]) -> Result<(), LayoutError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(path, serde_json::to_string_pretty(panels)?)?;
    info!("Layout with {} panels saved to {}", panels.len(), path.display());

    Ok(())
}

/// Computed data for one panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelData {
    pub id: String,
    pub panel_type: PanelKind,
    pub title: String,
    pub dimension: Dimension,
    pub metric: Metric,
    pub rows: Vec<AggregateRow>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub breakdown: Vec<Breakdown>,
}

/// Run one engine call per panel, in grid reading order (top to bottom, left to right)
///
/// Groupings are computed once per dimension and shared between panels.
pub fn compute_panels(records: &[RequestRecord], panels: &[PanelConfig]) -> Vec<PanelData> {
    let mut ordered: Vec<&PanelConfig> = panels.iter().collect();
    ordered.sort_by_key(|panel| (panel.y, panel.x));

    let mut groupings: HashMap<Dimension, Grouping<'_>> = HashMap::new();

    ordered
        .into_iter()
        .map(|panel| {
            let kind = panel.panel_type;
            let groups = groupings
                .entry(kind.dimension())
                .or_insert_with(|| group_by(records, kind.dimension()));

            PanelData {
                id: panel.id.clone(),
                panel_type: kind,
                title: kind.title().to_string(),
                dimension: kind.dimension(),
                metric: kind.metric(),
                rows: aggregate(groups, kind.metric()).rows,
                breakdown: kind
                    .split()
                    .map(|secondary| breakdown(groups, secondary, kind.metric()))
                    .unwrap_or_default(),
            }
        })
        .collect()
}
