use stations::{StationKind, StationStatus};

use crate::overlay::Overlay;
use crate::registry::OverlayRegistry;

/// Conjunction of optional kind and status predicates.
///
/// `OverlayFilter::default()` matches everything.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct OverlayFilter {
    pub kind: Option<StationKind>,
    pub status: Option<StationStatus>,
}

impl OverlayFilter {
    pub fn by_kind(kind: Option<StationKind>) -> Self {
        Self { kind, status: None }
    }

    pub fn by_status(status: Option<StationStatus>) -> Self {
        Self { kind: None, status }
    }

    pub fn is_pass_through(&self) -> bool {
        self.kind.is_none() && self.status.is_none()
    }

    pub fn matches(&self, overlay: &Overlay) -> bool {
        self.kind.is_none_or(|k| overlay.kind == k)
            && self.status.is_none_or(|s| overlay.status == s)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    pub visible: usize,
    /// Ids whose visibility flipped, in registry order.
    pub changed: Vec<String>,
}

impl OverlayRegistry {
    /// Shows exactly the overlays of `kind`; `None` shows all.
    ///
    /// A full pass on its own: any earlier status filter is discarded.
    pub fn filter_by_kind(&mut self, kind: Option<StationKind>) -> FilterOutcome {
        self.apply_filter(&OverlayFilter::by_kind(kind))
    }

    /// Shows exactly the overlays with `status`; `None` shows all.
    ///
    /// A full pass on its own: any earlier kind filter is discarded.
    pub fn filter_by_status(&mut self, status: Option<StationStatus>) -> FilterOutcome {
        self.apply_filter(&OverlayFilter::by_status(status))
    }

    /// Recomputes every overlay's visibility from `filter`.
    pub fn apply_filter(&mut self, filter: &OverlayFilter) -> FilterOutcome {
        let mut out = FilterOutcome::default();
        for overlay in self.all_mut() {
            let visible = filter.matches(overlay);
            if overlay.visible != visible {
                overlay.visible = visible;
                out.changed.push(overlay.id.clone());
            }
            if visible {
                out.visible += 1;
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::OverlayFilter;
    use crate::registry::OverlayRegistry;
    use foundation::LonLat;
    use pretty_assertions::assert_eq;
    use stations::{StationKind, StationRecord, StationStatus};

    fn registry() -> OverlayRegistry {
        let stations = [
            ("res_001", StationKind::Reservoir, StationStatus::Normal),
            ("res_002", StationKind::Reservoir, StationStatus::Warning),
            ("hydro_001", StationKind::HydrologicalStation, StationStatus::Warning),
            ("rain_001", StationKind::RainGauge, StationStatus::Normal),
        ]
        .map(|(id, kind, status)| {
            StationRecord::new(id, id, kind, LonLat::new(85.0, 41.5), status)
        });
        let mut reg = OverlayRegistry::new();
        reg.add_all(&stations);
        reg
    }

    fn visible_ids(reg: &OverlayRegistry) -> Vec<&str> {
        reg.all().filter(|o| o.visible).map(|o| o.id.as_str()).collect()
    }

    #[test]
    fn kind_filter_shows_exactly_that_kind() {
        let mut reg = registry();
        let out = reg.filter_by_kind(Some(StationKind::Reservoir));
        assert_eq!(out.visible, 2);
        assert_eq!(visible_ids(&reg), vec!["res_001", "res_002"]);
        assert_eq!(out.changed, vec!["hydro_001", "rain_001"]);

        let out = reg.filter_by_kind(None);
        assert_eq!(out.visible, 4);
        assert!(reg.all().all(|o| o.visible));
    }

    #[test]
    fn kind_and_status_passes_do_not_compose() {
        let mut reg = registry();
        reg.filter_by_kind(Some(StationKind::Reservoir));
        reg.filter_by_status(Some(StationStatus::Warning));
        assert_eq!(visible_ids(&reg), vec!["res_002", "hydro_001"]);
    }

    #[test]
    fn combined_filter_is_a_conjunction() {
        let mut reg = registry();
        let filter = OverlayFilter {
            kind: Some(StationKind::Reservoir),
            status: Some(StationStatus::Warning),
        };
        let out = reg.apply_filter(&filter);
        assert_eq!(out.visible, 1);
        assert_eq!(visible_ids(&reg), vec!["res_002"]);

        assert!(OverlayFilter::default().is_pass_through());
        reg.apply_filter(&OverlayFilter::default());
        assert_eq!(visible_ids(&reg).len(), 4);
    }

    #[test]
    fn filtering_keeps_overlays_addressable() {
        let mut reg = registry();
        reg.filter_by_status(Some(StationStatus::Danger));
        assert_eq!(reg.len(), 4);
        assert_eq!(visible_ids(&reg), Vec::<&str>::new());
        assert!(reg.get("res_001").is_some_and(|o| !o.visible));
    }

    #[test]
    fn filtering_an_empty_registry_is_a_no_op() {
        let mut reg = OverlayRegistry::new();
        let out = reg.filter_by_kind(Some(StationKind::RainGauge));
        assert_eq!(out.visible, 0);
        assert!(out.changed.is_empty());
    }
}
