//! Render surface without a GPU.
//!
//! Projects markers with a local equirectangular mapping around the camera
//! center and hit-tests them in screen space. Camera flights complete
//! instantly. Used by tests and the CLI driver.

use foundation::LonLat;
use foundation::math::Vec2;
use layers::Overlay;

use crate::picking::{MarkerFootprint, PickOptions, pick_marker};
use crate::surface::{Cursor, FlyTo, PickedObject, RenderSurface, ScreenPoint};

/// Vertical field of view used to turn camera height into ground extent.
const FOV_Y_DEG: f64 = 60.0;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub width_px: f64,
    pub height_px: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width_px: 1280.0,
            height_px: 720.0,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraState {
    pub center: LonLat,
    pub height_m: f64,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            center: LonLat::new(0.0, 0.0),
            height_m: 20_000_000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct PlacedMarker {
    overlay: Overlay,
}

#[derive(Debug, Default)]
pub struct HeadlessSurface {
    viewport: Viewport,
    camera: CameraState,
    pick: PickOptions,
    markers: Vec<PlacedMarker>,
    foreign: Vec<[Vec2; 2]>,
    cursor: Cursor,
    flights: Vec<FlyTo>,
}

impl HeadlessSurface {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    pub fn with_pick_options(mut self, pick: PickOptions) -> Self {
        self.pick = pick;
        self
    }

    pub fn with_camera(mut self, camera: CameraState) -> Self {
        self.camera = camera;
        self
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn camera(&self) -> CameraState {
        self.camera
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Every flight issued so far, oldest first.
    pub fn flights(&self) -> &[FlyTo] {
        &self.flights
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// The surface's copy of a placed marker.
    pub fn marker(&self, id: &str) -> Option<&Overlay> {
        self.markers
            .iter()
            .find(|m| m.overlay.id == id)
            .map(|m| &m.overlay)
    }

    /// Registers a non-overlay object covering a screen rectangle.
    pub fn add_foreign_object(&mut self, min: ScreenPoint, max: ScreenPoint) {
        self.foreign.push([min, max]);
    }

    fn meters_per_pixel(&self) -> f64 {
        let ground_height_m = 2.0 * self.camera.height_m * (FOV_Y_DEG.to_radians() * 0.5).tan();
        ground_height_m / self.viewport.height_px.max(1.0)
    }

    /// Screen position of `position` under the current camera.
    pub fn project(&self, position: LonLat) -> Option<ScreenPoint> {
        let mpp = self.meters_per_pixel();
        if !(mpp.is_finite() && mpp > 0.0) {
            return None;
        }
        let offset = position.offset_from(self.camera.center);
        let p = Vec2::new(
            self.viewport.width_px * 0.5 + offset.x / mpp,
            self.viewport.height_px * 0.5 - offset.y / mpp,
        );
        (p.x.is_finite() && p.y.is_finite()).then_some(p)
    }

    fn footprint<'a>(&self, order: usize, overlay: &'a Overlay) -> Option<MarkerFootprint<'a>> {
        let center = self.project(overlay.position)?;
        let radius_px = f64::from(overlay.pixel_size()) * 0.5;
        let [w, h] = overlay.label.estimated_size_px();
        let [dx, dy] = overlay.label.style.pixel_offset;
        // Bottom-anchored plate above the marker.
        let bottom = center.y + f64::from(dy);
        let half_w = f64::from(w) * 0.5;
        let label_rect = Some([
            Vec2::new(center.x + f64::from(dx) - half_w, bottom - f64::from(h)),
            Vec2::new(center.x + f64::from(dx) + half_w, bottom),
        ]);
        Some(MarkerFootprint {
            id: &overlay.id,
            center,
            radius_px,
            label_rect,
            draw_order: order,
        })
    }
}

impl RenderSurface for HeadlessSurface {
    fn add_marker(&mut self, overlay: &Overlay) {
        match self.markers.iter_mut().find(|m| m.overlay.id == overlay.id) {
            Some(m) => m.overlay = overlay.clone(),
            None => self.markers.push(PlacedMarker {
                overlay: overlay.clone(),
            }),
        }
    }

    fn update_marker(&mut self, overlay: &Overlay) {
        if let Some(m) = self.markers.iter_mut().find(|m| m.overlay.id == overlay.id) {
            m.overlay = overlay.clone();
        }
    }

    fn remove_all_markers(&mut self) {
        self.markers.clear();
    }

    fn hit_test(&self, point: ScreenPoint) -> Option<PickedObject> {
        let footprints = self
            .markers
            .iter()
            .enumerate()
            .filter(|(_, m)| m.overlay.visible)
            .filter_map(|(i, m)| self.footprint(i, &m.overlay));

        // Markers ignore depth, so they sit above anything foreign.
        if let Some(id) = pick_marker(footprints, point, self.pick) {
            return Some(PickedObject::Overlay(id.to_string()));
        }

        self.foreign
            .iter()
            .any(|[min, max]| {
                point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
            })
            .then_some(PickedObject::Foreign)
    }

    fn fly_to(&mut self, target: FlyTo) {
        self.camera = match &target {
            FlyTo::Region {
                center, height_m, ..
            } => CameraState {
                center: *center,
                height_m: *height_m,
            },
            FlyTo::Overlay {
                position, offset, ..
            } => CameraState {
                center: *position,
                height_m: offset.eye_height_m(),
            },
        };
        self.flights.push(target);
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }
}
