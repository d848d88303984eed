use foundation::math::Vec2;

use crate::surface::ScreenPoint;

/// Screen-space footprint of one placed marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerFootprint<'a> {
    pub id: &'a str,
    pub center: Vec2,
    pub radius_px: f64,
    /// Label plate as `[min, max]` in screen pixels.
    pub label_rect: Option<[Vec2; 2]>,
    /// Position in draw order; later markers are drawn on top.
    pub draw_order: usize,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickOptions {
    /// Extra slack around the marker disc.
    pub tolerance_px: f64,
}

impl Default for PickOptions {
    fn default() -> Self {
        Self { tolerance_px: 4.0 }
    }
}

/// Deterministic screen picking over marker footprints.
///
/// Ordering contract:
/// - Disc hits win over label hits.
/// - Among disc hits, the closest center wins; equal distance goes to the
///   higher `draw_order` (the marker drawn on top).
/// - Among label hits, the higher `draw_order` wins.
pub fn pick_marker<'a, I>(footprints: I, point: ScreenPoint, opts: PickOptions) -> Option<&'a str>
where
    I: IntoIterator<Item = MarkerFootprint<'a>>,
{
    let mut best_disc: Option<(f64, usize, &'a str)> = None;
    let mut best_label: Option<(usize, &'a str)> = None;

    for fp in footprints {
        let d = fp.center.distance(point);
        if !d.is_finite() {
            continue;
        }

        if d <= fp.radius_px + opts.tolerance_px {
            best_disc = match best_disc {
                None => Some((d, fp.draw_order, fp.id)),
                Some((bd, bo, bid)) => {
                    let ord = d.total_cmp(&bd).then_with(|| bo.cmp(&fp.draw_order));
                    if ord.is_lt() {
                        Some((d, fp.draw_order, fp.id))
                    } else {
                        Some((bd, bo, bid))
                    }
                }
            };
            continue;
        }

        if let Some([min, max]) = fp.label_rect
            && point.x >= min.x
            && point.x <= max.x
            && point.y >= min.y
            && point.y <= max.y
            && best_label.is_none_or(|(bo, _)| fp.draw_order > bo)
        {
            best_label = Some((fp.draw_order, fp.id));
        }
    }

    best_disc
        .map(|(_, _, id)| id)
        .or(best_label.map(|(_, id)| id))
}

#[cfg(test)]
mod tests {
    use super::{MarkerFootprint, PickOptions, pick_marker};
    use foundation::math::Vec2;

    fn disc(id: &str, x: f64, y: f64, order: usize) -> MarkerFootprint<'_> {
        MarkerFootprint {
            id,
            center: Vec2::new(x, y),
            radius_px: 6.0,
            label_rect: None,
            draw_order: order,
        }
    }

    #[test]
    fn picks_nearest_disc() {
        let fps = vec![disc("a", 100.0, 100.0, 0), disc("b", 108.0, 100.0, 1)];
        let hit = pick_marker(fps, Vec2::new(102.0, 100.0), PickOptions::default());
        assert_eq!(hit, Some("a"));
    }

    #[test]
    fn equal_distance_goes_to_topmost() {
        let fps = vec![disc("under", 50.0, 50.0, 0), disc("over", 50.0, 50.0, 1)];
        let hit = pick_marker(fps, Vec2::new(50.0, 50.0), PickOptions::default());
        assert_eq!(hit, Some("over"));
    }

    #[test]
    fn miss_outside_radius_plus_tolerance() {
        let fps = vec![disc("a", 100.0, 100.0, 0)];
        assert_eq!(
            pick_marker(fps.clone(), Vec2::new(110.5, 100.0), PickOptions::default()),
            None
        );
        assert_eq!(
            pick_marker(fps, Vec2::new(109.5, 100.0), PickOptions::default()),
            Some("a")
        );
    }

    #[test]
    fn label_hit_only_when_no_disc_hit() {
        let mut labelled = disc("label", 200.0, 200.0, 0);
        labelled.label_rect = Some([Vec2::new(170.0, 170.0), Vec2::new(230.0, 185.0)]);
        let other = disc("disc", 300.0, 300.0, 1);

        let hit = pick_marker(
            vec![labelled.clone(), other.clone()],
            Vec2::new(180.0, 175.0),
            PickOptions::default(),
        );
        assert_eq!(hit, Some("label"));

        let hit = pick_marker(
            vec![labelled, other],
            Vec2::new(300.0, 302.0),
            PickOptions::default(),
        );
        assert_eq!(hit, Some("disc"));
    }

    #[test]
    fn empty_input_is_no_hit() {
        let none: Vec<MarkerFootprint<'_>> = Vec::new();
        assert_eq!(pick_marker(none, Vec2::new(0.0, 0.0), PickOptions::default()), None);
    }
}
