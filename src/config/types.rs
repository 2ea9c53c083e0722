//! Configuration type definitions.

use crate::draw::ToolPosition;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Map view settings.
///
/// Controls where the map opens and which tiles it shows.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MapConfig {
    /// Initial center as `[latitude, longitude]`
    #[serde(default = "default_center")]
    pub center: [f64; 2],

    /// Initial zoom level (valid range: 0 - 19)
    #[serde(default = "default_zoom")]
    pub zoom: u8,

    /// Tile URL template with `{s}`, `{z}`, `{x}` and `{y}` placeholders
    #[serde(default = "default_tile_url")]
    pub tile_url: String,

    /// Attribution shown for the tile provider
    #[serde(default = "default_attribution")]
    pub attribution: String,

    /// Enable shift-drag box zoom. Off by default because it fights rectangle drawing
    #[serde(default)]
    pub box_zoom: bool,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: default_center(),
            zoom: default_zoom(),
            tile_url: default_tile_url(),
            attribution: default_attribution(),
            box_zoom: false,
        }
    }
}

/// Drawing tool settings.
///
/// Controls where the toolbar sits and how drawn rectangles look.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DrawConfig {
    /// Toolbar corner (top-left, top-right, bottom-left, bottom-right)
    #[serde(default)]
    pub position: ToolPosition,

    /// Rectangle outline color as `#rrggbb`
    #[serde(default = "default_color")]
    pub color: String,

    /// Outline width in pixels (valid range: 1.0 - 20.0)
    #[serde(default = "default_weight")]
    pub weight: f64,

    /// Outline opacity (valid range: 0.0 - 1.0)
    #[serde(default = "default_opacity")]
    pub opacity: f64,

    /// Fill opacity (valid range: 0.0 - 1.0)
    #[serde(default = "default_fill_opacity")]
    pub fill_opacity: f64,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            position: ToolPosition::default(),
            color: default_color(),
            weight: default_weight(),
            opacity: default_opacity(),
            fill_opacity: default_fill_opacity(),
        }
    }
}

/// Result dialog settings.
///
/// The labels are plain strings so they can be localized.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PresenterConfig {
    /// Digits after the decimal point (valid range: 0 - 12)
    #[serde(default = "default_decimals")]
    pub decimals: usize,

    /// Dialog title
    #[serde(default = "default_title")]
    pub title: String,

    /// Text shown before any area was selected
    #[serde(default = "default_empty_text")]
    pub empty_text: String,

    /// Label of the close button
    #[serde(default = "default_close_label")]
    pub close_label: String,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            decimals: default_decimals(),
            title: default_title(),
            empty_text: default_empty_text(),
            close_label: default_close_label(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

pub(super) fn default_center() -> [f64; 2] {
    [55.751244, 37.618423] // Moscow
}

fn default_zoom() -> u8 {
    10
}

pub(super) fn default_tile_url() -> String {
    "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string()
}

fn default_attribution() -> String {
    "&copy; OpenStreetMap contributors".to_string()
}

pub(super) fn default_color() -> String {
    "#3388ff".to_string()
}

fn default_weight() -> f64 {
    4.0
}

fn default_opacity() -> f64 {
    0.5
}

fn default_fill_opacity() -> f64 {
    0.2
}

fn default_decimals() -> usize {
    6
}

fn default_title() -> String {
    "Selected area coordinates".to_string()
}

fn default_empty_text() -> String {
    "No data".to_string()
}

fn default_close_label() -> String {
    "Close".to_string()
}
