//! Dashboard panels: layout persistence, per-panel engine calls and rendering.

pub mod panels;
pub mod render;

pub use panels::{
    compute_panels, default_layout, load_layout, save_layout, PanelConfig, PanelData, PanelKind,
};
pub use render::{format_bytes, render_dashboard, render_panel, render_summary};
