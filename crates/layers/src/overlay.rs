use foundation::LonLat;
use stations::{StationKind, StationRecord, StationStatus};

use crate::labels::LabelSpec;
use crate::symbology::{IconTag, MarkerStyle, MarkerStyleConfig};

/// A renderable point-plus-label bound to one station.
///
/// `id` mirrors the station id. `kind` and `status` are copied so filters can
/// run without the directory.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub id: String,
    pub position: LonLat,
    pub marker: MarkerStyle,
    pub label: LabelSpec,
    pub icon: IconTag,
    pub kind: StationKind,
    pub status: StationStatus,
    pub visible: bool,
    pub highlighted: bool,
}

impl Overlay {
    /// Current marker diameter, following the highlight state.
    pub fn pixel_size(&self) -> f32 {
        self.marker.pixel_size(self.highlighted)
    }

    pub fn label_text(&self) -> &str {
        &self.label.text
    }
}

/// Builds overlays from station records.
///
/// Deterministic: equal records give equal overlays. It has no view of the
/// camera and registers nothing; callers own the result.
#[derive(Debug, Clone, Default)]
pub struct OverlayFactory {
    config: MarkerStyleConfig,
}

impl OverlayFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MarkerStyleConfig) -> Self {
        Self { config }
    }

    pub fn create(&self, station: &StationRecord) -> Overlay {
        Overlay {
            id: station.id.clone(),
            position: station.position,
            marker: MarkerStyle::for_status(station.status, &self.config),
            label: LabelSpec::new(station.name.clone()),
            icon: IconTag::for_kind(station.kind),
            kind: station.kind,
            status: station.status,
            visible: true,
            highlighted: false,
        }
    }
}

/// `OverlayFactory::default().create(station)`.
pub fn create_overlay(station: &StationRecord) -> Overlay {
    OverlayFactory::default().create(station)
}
