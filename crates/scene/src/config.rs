use layers::symbology::{MARKER_BASELINE_PX, MARKER_HIGHLIGHT_PX, MarkerStyleConfig};
use serde::{Deserialize, Serialize};

use crate::events::DEFAULT_LOG_CAPACITY;
use crate::headless::Viewport;
use crate::picking::PickOptions;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Json(String),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Json(msg) => write!(f, "view config is not valid json: {msg}"),
            ConfigError::Invalid(msg) => write!(f, "invalid view config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    pub baseline_px: f32,
    pub highlight_px: f32,
    pub outline_width_px: f32,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            baseline_px: MARKER_BASELINE_PX,
            highlight_px: MARKER_HIGHLIGHT_PX,
            outline_width_px: 2.0,
        }
    }
}

/// Region the view opens on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeRegion {
    pub lng: f64,
    pub lat: f64,
    pub height_m: f64,
    pub duration_s: f64,
}

impl Default for HomeRegion {
    fn default() -> Self {
        Self {
            lng: 85.0,
            lat: 41.5,
            height_m: 3_000_000.0,
            duration_s: 2.0,
        }
    }
}

/// Camera offset used when flying to a single overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusConfig {
    pub heading_deg: f64,
    pub pitch_deg: f64,
    pub range_m: f64,
    pub duration_s: f64,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            heading_deg: 0.0,
            pitch_deg: -45.0,
            range_m: 50_000.0,
            duration_s: 1.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub marker: MarkerConfig,
    pub home: HomeRegion,
    pub focus: FocusConfig,
    pub pick_tolerance_px: f64,
    pub viewport_width_px: f64,
    pub viewport_height_px: f64,
    /// Clear the selection when a click hits nothing.
    pub deselect_on_empty_click: bool,
    /// Interaction events kept before the oldest are dropped.
    pub event_log_capacity: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        let viewport = Viewport::default();
        Self {
            marker: MarkerConfig::default(),
            home: HomeRegion::default(),
            focus: FocusConfig::default(),
            pick_tolerance_px: PickOptions::default().tolerance_px,
            viewport_width_px: viewport.width_px,
            viewport_height_px: viewport.height_px,
            deselect_on_empty_click: false,
            event_log_capacity: DEFAULT_LOG_CAPACITY,
        }
    }
}

impl ViewConfig {
    /// Parses a JSON config. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let m = &self.marker;
        if !(m.baseline_px > 0.0 && m.highlight_px > 0.0) {
            return Err(ConfigError::Invalid("marker sizes must be positive".into()));
        }
        if m.highlight_px < m.baseline_px {
            return Err(ConfigError::Invalid(
                "highlight size must not be smaller than baseline".into(),
            ));
        }
        if !(self.home.height_m.is_finite() && self.home.height_m > 0.0) {
            return Err(ConfigError::Invalid("home height must be positive".into()));
        }
        if !(self.focus.range_m.is_finite() && self.focus.range_m > 0.0) {
            return Err(ConfigError::Invalid("focus range must be positive".into()));
        }
        if !(self.viewport_width_px >= 1.0 && self.viewport_height_px >= 1.0) {
            return Err(ConfigError::Invalid("viewport must be at least 1x1".into()));
        }
        if self.pick_tolerance_px.is_nan() || self.pick_tolerance_px < 0.0 {
            return Err(ConfigError::Invalid("pick tolerance must be >= 0".into()));
        }
        if self.event_log_capacity == 0 {
            return Err(ConfigError::Invalid("event log capacity must be >= 1".into()));
        }
        Ok(())
    }

    pub fn marker_style(&self) -> MarkerStyleConfig {
        MarkerStyleConfig {
            baseline_px: self.marker.baseline_px,
            highlight_px: self.marker.highlight_px,
            outline_width_px: self.marker.outline_width_px,
            ..MarkerStyleConfig::default()
        }
    }

    pub fn viewport(&self) -> Viewport {
        Viewport {
            width_px: self.viewport_width_px,
            height_px: self.viewport_height_px,
        }
    }

    pub fn pick_options(&self) -> PickOptions {
        PickOptions {
            tolerance_px: self.pick_tolerance_px,
        }
    }
}
