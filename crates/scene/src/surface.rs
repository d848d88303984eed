//! Host binding.
//!
//! The overlay core needs four things from a renderer: place a marker, drop
//! all markers, hit-test a screen point, and move the camera. Visual-state
//! updates and the cursor affordance ride on the same trait so the core never
//! touches renderer-native objects.

use foundation::LonLat;
use foundation::math::Vec2;
use layers::Overlay;

use crate::panel::DetailPanel;

/// Pointer position in CSS pixels, origin top-left.
pub type ScreenPoint = Vec2;

/// What a hit-test resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickedObject {
    /// A marker placed through `add_marker`, by overlay id.
    Overlay(String),
    /// Something else the host draws (terrain widgets, tilesets, ...).
    Foreign,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    Pointer,
}

/// Camera offset relative to a target, in degrees and meters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HeadingPitchRange {
    pub heading_deg: f64,
    pub pitch_deg: f64,
    pub range_m: f64,
}

impl HeadingPitchRange {
    pub const fn new(heading_deg: f64, pitch_deg: f64, range_m: f64) -> Self {
        Self {
            heading_deg,
            pitch_deg,
            range_m,
        }
    }

    /// Height above the target the offset puts the eye at.
    pub fn eye_height_m(&self) -> f64 {
        self.range_m * self.pitch_deg.to_radians().sin().abs()
    }
}

/// Camera transition command.
#[derive(Debug, Clone, PartialEq)]
pub enum FlyTo {
    Region {
        center: LonLat,
        height_m: f64,
        duration_s: f64,
    },
    Overlay {
        id: String,
        position: LonLat,
        offset: HeadingPitchRange,
        duration_s: f64,
    },
}

pub trait RenderSurface {
    fn add_marker(&mut self, overlay: &Overlay);
    /// Re-applies size, colour and visibility of an already placed marker.
    fn update_marker(&mut self, overlay: &Overlay);
    fn remove_all_markers(&mut self);
    fn hit_test(&self, point: ScreenPoint) -> Option<PickedObject>;
    fn fly_to(&mut self, target: FlyTo);
    fn set_cursor(&mut self, cursor: Cursor);
}

/// Presentation surface for composed detail panels.
pub trait DetailSink {
    fn show(&mut self, panel: &DetailPanel);
}

impl DetailSink for Vec<DetailPanel> {
    fn show(&mut self, panel: &DetailPanel) {
        self.push(panel.clone());
    }
}
