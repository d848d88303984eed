use std::collections::HashMap;

use stations::StationRecord;

use crate::overlay::{Overlay, OverlayFactory};

/// Index of active overlays.
///
/// Ordering contract:
/// - `all()` yields overlays in first-insertion order.
/// - Re-adding an existing id replaces that overlay in place.
///
/// At most one overlay is highlighted; `set_highlighted(id, true)` clears the
/// previous one before marking the new one.
#[derive(Debug, Default)]
pub struct OverlayRegistry {
    factory: OverlayFactory,
    overlays: Vec<Overlay>,
    index: HashMap<String, usize>,
}

impl OverlayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_factory(factory: OverlayFactory) -> Self {
        Self {
            factory,
            ..Self::default()
        }
    }

    /// Creates one overlay per station. Returns the affected ids in order.
    pub fn add_all<'a, I>(&mut self, stations: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a StationRecord>,
    {
        let mut ids = Vec::new();
        for station in stations {
            let overlay = self.factory.create(station);
            ids.push(overlay.id.clone());
            self.insert(overlay);
        }
        ids
    }

    /// Stores `overlay`, replacing any overlay with the same id.
    pub fn insert(&mut self, overlay: Overlay) {
        match self.index.get(&overlay.id) {
            Some(&i) => {
                tracing::debug!(id = %overlay.id, "replacing overlay");
                self.overlays[i] = overlay;
            }
            None => {
                self.index.insert(overlay.id.clone(), self.overlays.len());
                self.overlays.push(overlay);
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Overlay> {
        self.index.get(id).and_then(|&i| self.overlays.get(i))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn all(&self) -> impl Iterator<Item = &Overlay> + '_ {
        self.overlays.iter()
    }

    pub(crate) fn all_mut(&mut self) -> impl Iterator<Item = &mut Overlay> + '_ {
        self.overlays.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    pub fn clear(&mut self) {
        self.overlays.clear();
        self.index.clear();
    }

    pub fn highlighted_id(&self) -> Option<&str> {
        self.overlays
            .iter()
            .find(|o| o.highlighted)
            .map(|o| o.id.as_str())
    }

    /// Sets the highlight state of `id`.
    ///
    /// Returns `false` (and changes nothing) when `id` is not registered.
    pub fn set_highlighted(&mut self, id: &str, highlighted: bool) -> bool {
        let Some(&target) = self.index.get(id) else {
            return false;
        };
        if highlighted {
            for (i, o) in self.overlays.iter_mut().enumerate() {
                if i != target {
                    o.highlighted = false;
                }
            }
        }
        self.overlays[target].highlighted = highlighted;
        true
    }

    /// Returns `false` when `id` is not registered.
    pub fn set_visible(&mut self, id: &str, visible: bool) -> bool {
        let Some(&i) = self.index.get(id) else {
            return false;
        };
        self.overlays[i].visible = visible;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::OverlayRegistry;
    use foundation::{LonLat, Rgba};
    use pretty_assertions::assert_eq;
    use stations::{StationKind, StationRecord, StationStatus};

    fn stations() -> Vec<StationRecord> {
        vec![
            StationRecord::new(
                "res_001",
                "Ulugqat Reservoir",
                StationKind::Reservoir,
                LonLat::new(79.35, 37.25),
                StationStatus::Normal,
            ),
            StationRecord::new(
                "rain_002",
                "Ili Valley Gauge",
                StationKind::RainGauge,
                LonLat::new(81.85, 43.45),
                StationStatus::Warning,
            ),
        ]
    }

    fn ids(reg: &OverlayRegistry) -> Vec<String> {
        reg.all().map(|o| o.id.clone()).collect()
    }

    #[test]
    fn add_all_registers_every_station_with_its_name() {
        let stations = stations();
        let mut reg = OverlayRegistry::new();
        reg.add_all(&stations);

        assert_eq!(reg.len(), 2);
        for s in &stations {
            let o = reg.get(&s.id).expect("overlay");
            assert_eq!(o.label_text(), s.name);
        }
        assert_eq!(reg.get("res_001").map(|o| o.marker.fill), Some(Rgba::GREEN));
        assert_eq!(reg.get("rain_002").map(|o| o.marker.fill), Some(Rgba::YELLOW));
    }

    #[test]
    fn readding_an_id_replaces_in_place() {
        let mut stations = stations();
        let mut reg = OverlayRegistry::new();
        reg.add_all(&stations);

        stations[0].status = StationStatus::Danger;
        stations[0].name = "Ulugqat (renamed)".into();
        reg.add_all(&stations[..1]);

        assert_eq!(ids(&reg), vec!["res_001", "rain_002"]);
        let o = reg.get("res_001").expect("overlay");
        assert_eq!(o.marker.fill, Rgba::RED);
        assert_eq!(o.label_text(), "Ulugqat (renamed)");
    }

    #[test]
    fn clear_returns_to_fresh_state() {
        let stations = stations();
        let mut reg = OverlayRegistry::new();
        reg.add_all(&stations);
        reg.set_highlighted("res_001", true);
        reg.clear();

        assert!(reg.is_empty());
        assert_eq!(reg.all().count(), 0);
        assert!(reg.get("res_001").is_none());
        assert_eq!(reg.highlighted_id(), None);
        reg.clear();
        assert!(reg.is_empty());

        let mut fresh = OverlayRegistry::new();
        fresh.add_all(&stations);
        reg.add_all(&stations);
        assert_eq!(
            reg.all().cloned().collect::<Vec<_>>(),
            fresh.all().cloned().collect::<Vec<_>>()
        );
    }

    #[test]
    fn highlight_is_exclusive() {
        let mut reg = OverlayRegistry::new();
        reg.add_all(&stations());

        assert!(reg.set_highlighted("res_001", true));
        assert!(reg.set_highlighted("rain_002", true));
        assert_eq!(reg.all().filter(|o| o.highlighted).count(), 1);
        assert_eq!(reg.highlighted_id(), Some("rain_002"));

        assert!(reg.set_highlighted("rain_002", false));
        assert_eq!(reg.highlighted_id(), None);
        assert!(!reg.set_highlighted("missing", true));
    }

    #[test]
    fn visibility_by_id() {
        let mut reg = OverlayRegistry::new();
        reg.add_all(&stations());
        assert!(reg.set_visible("rain_002", false));
        assert_eq!(reg.get("rain_002").map(|o| o.visible), Some(false));
        assert!(!reg.set_visible("missing", false));
    }
}
