use foundation::Rgba;
use stations::{StationKind, StationStatus};

/// Baseline marker diameter (px).
pub const MARKER_BASELINE_PX: f32 = 12.0;
/// Marker diameter while hovered (px).
pub const MARKER_HIGHLIGHT_PX: f32 = 18.0;

/// Fill colour for a station status.
pub fn status_color(status: StationStatus) -> Rgba {
    match status {
        StationStatus::Danger => Rgba::RED,
        StationStatus::Warning => Rgba::YELLOW,
        StationStatus::Normal => Rgba::GREEN,
    }
}

/// CSS colour hint for a station status, as used by detail panels.
pub fn status_hex(status: StationStatus) -> String {
    status_color(status).to_hex()
}

/// Symbolic icon for a station kind. The host maps tags to glyphs.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum IconTag {
    Reservoir,
    HydrologicalStation,
    RainGauge,
    Unknown,
}

impl IconTag {
    pub fn for_kind(kind: StationKind) -> Self {
        match kind {
            StationKind::Reservoir => IconTag::Reservoir,
            StationKind::HydrologicalStation => IconTag::HydrologicalStation,
            StationKind::RainGauge => IconTag::RainGauge,
            StationKind::Unknown => IconTag::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IconTag::Reservoir => "reservoir",
            IconTag::HydrologicalStation => "hydrological-station",
            IconTag::RainGauge => "rain-gauge",
            IconTag::Unknown => "unknown",
        }
    }
}

/// Sizes and outline shared by every marker in a view.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MarkerStyleConfig {
    pub baseline_px: f32,
    pub highlight_px: f32,
    pub outline: Rgba,
    pub outline_width_px: f32,
}

impl Default for MarkerStyleConfig {
    fn default() -> Self {
        Self {
            baseline_px: MARKER_BASELINE_PX,
            highlight_px: MARKER_HIGHLIGHT_PX,
            outline: Rgba::WHITE,
            outline_width_px: 2.0,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MarkerStyle {
    pub fill: Rgba,
    pub outline: Rgba,
    pub outline_width_px: f32,
    pub baseline_px: f32,
    pub highlight_px: f32,
    /// Markers ignore depth so terrain never occludes them.
    pub always_on_top: bool,
}

impl MarkerStyle {
    pub fn for_status(status: StationStatus, config: &MarkerStyleConfig) -> Self {
        Self {
            fill: status_color(status),
            outline: config.outline,
            outline_width_px: config.outline_width_px,
            baseline_px: config.baseline_px,
            highlight_px: config.highlight_px,
            always_on_top: true,
        }
    }

    pub fn pixel_size(&self, highlighted: bool) -> f32 {
        if highlighted {
            self.highlight_px
        } else {
            self.baseline_px
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{IconTag, MarkerStyle, MarkerStyleConfig, status_color, status_hex};
    use foundation::Rgba;
    use stations::{StationKind, StationStatus};

    #[test]
    fn status_table() {
        assert_eq!(status_color(StationStatus::Danger), Rgba::RED);
        assert_eq!(status_color(StationStatus::Warning), Rgba::YELLOW);
        assert_eq!(status_color(StationStatus::Normal), Rgba::GREEN);
        assert_eq!(status_hex(StationStatus::Danger), "#ff0000");
        assert_eq!(status_hex(StationStatus::Warning), "#ffff00");
        assert_eq!(status_hex(StationStatus::Normal), "#00ff00");
    }

    #[test]
    fn unknown_kind_gets_fallback_icon() {
        assert_eq!(IconTag::for_kind(StationKind::Unknown), IconTag::Unknown);
        assert_eq!(IconTag::for_kind(StationKind::RainGauge).as_str(), "rain-gauge");
    }

    #[test]
    fn highlight_enlarges_marker() {
        let style = MarkerStyle::for_status(StationStatus::Normal, &MarkerStyleConfig::default());
        assert_eq!(style.pixel_size(false), 12.0);
        assert_eq!(style.pixel_size(true), 18.0);
    }
}
