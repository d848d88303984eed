use foundation::LonLat;
use layers::OverlayRegistry;

use crate::config::ViewConfig;
use crate::surface::{FlyTo, HeadingPitchRange, RenderSurface};

/// Issues fly-to commands for regions and overlays.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraDirector {
    home_center: LonLat,
    home_height_m: f64,
    region_duration_s: f64,
    overlay_offset: HeadingPitchRange,
    overlay_duration_s: f64,
}

impl CameraDirector {
    pub fn from_config(config: &ViewConfig) -> Self {
        Self {
            home_center: LonLat::new(config.home.lng, config.home.lat),
            home_height_m: config.home.height_m,
            region_duration_s: config.home.duration_s,
            overlay_offset: HeadingPitchRange::new(
                config.focus.heading_deg,
                config.focus.pitch_deg,
                config.focus.range_m,
            ),
            overlay_duration_s: config.focus.duration_s,
        }
    }

    pub fn focus_region<S: RenderSurface>(&self, surface: &mut S, center: LonLat, height_m: f64) {
        tracing::debug!(lon = center.lon_deg, lat = center.lat_deg, height_m, "focus region");
        surface.fly_to(FlyTo::Region {
            center,
            height_m,
            duration_s: self.region_duration_s,
        });
    }

    pub fn focus_home<S: RenderSurface>(&self, surface: &mut S) {
        self.focus_region(surface, self.home_center, self.home_height_m);
    }

    /// Flies to bound overlay `id`.
    ///
    /// An id the registry does not hold is a silent no-op (ids can go stale
    /// across a reload). Returns whether a flight was issued.
    pub fn focus_overlay<S: RenderSurface>(
        &self,
        registry: &OverlayRegistry,
        surface: &mut S,
        id: &str,
    ) -> bool {
        let Some(overlay) = registry.get(id) else {
            tracing::debug!(id, "focus skipped, overlay not registered");
            return false;
        };
        surface.fly_to(FlyTo::Overlay {
            id: overlay.id.clone(),
            position: overlay.position,
            offset: self.overlay_offset,
            duration_s: self.overlay_duration_s,
        });
        true
    }
}

impl Default for CameraDirector {
    fn default() -> Self {
        Self::from_config(&ViewConfig::default())
    }
}
