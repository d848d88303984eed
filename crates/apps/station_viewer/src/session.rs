//! Scripted pointer/command sessions replayed against the headless surface.

use foundation::LonLat;
use foundation::math::Vec2;
use layers::OverlayFilter;
use scene::events::LoggedEvent;
use scene::headless::HeadlessSurface;
use scene::panel::DetailPanel;
use scene::{StationOverlayManager, ViewConfig};
use serde::{Deserialize, Serialize};
use stations::{StationDirectory, StationKind, StationStatus};

pub type HeadlessManager = StationOverlayManager<HeadlessSurface, Vec<DetailPanel>>;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Move { x: f64, y: f64 },
    /// Pointer-move onto the projected position of a station.
    MoveTo { id: String },
    Click { x: f64, y: f64 },
    ClickOn { id: String },
    FilterKind { kind: Option<StationKind> },
    FilterStatus { status: Option<StationStatus> },
    Filter {
        #[serde(default)]
        kind: Option<StationKind>,
        #[serde(default)]
        status: Option<StationStatus>,
    },
    Focus { id: String },
    FocusRegion { lng: f64, lat: f64, height_m: f64 },
    Home,
    Clear,
    Reload,
}

pub fn parse_script(json: &str) -> Result<Vec<Step>, String> {
    serde_json::from_str(json).map_err(|e| format!("session script: {e}"))
}

#[derive(Debug, Serialize)]
pub struct CameraReport {
    pub lng: f64,
    pub lat: f64,
    pub height_m: f64,
}

#[derive(Debug, Serialize)]
pub struct SessionReport {
    pub overlays: usize,
    pub visible: usize,
    pub hovered_id: Option<String>,
    pub selected_id: Option<String>,
    pub camera: CameraReport,
    pub panels: Vec<DetailPanel>,
    pub events: Vec<LoggedEvent>,
}

pub fn new_manager(config: &ViewConfig) -> HeadlessManager {
    let surface =
        HeadlessSurface::new(config.viewport()).with_pick_options(config.pick_options());
    StationOverlayManager::new(surface, Vec::new(), config)
}

/// Initialises a view over `directory` and replays `steps` in order.
pub fn run(config: &ViewConfig, directory: StationDirectory, steps: &[Step]) -> SessionReport {
    let mut m = new_manager(config);
    m.init(directory.clone());

    for (i, step) in steps.iter().enumerate() {
        tracing::debug!(step = i, ?step, "replaying");
        apply(&mut m, &directory, step);
    }

    report(&mut m)
}

fn station_point(m: &HeadlessManager, id: &str) -> Option<Vec2> {
    let position = m.registry().get(id)?.position;
    m.surface().project(position)
}

fn apply(m: &mut HeadlessManager, directory: &StationDirectory, step: &Step) {
    match step {
        Step::Move { x, y } => {
            m.on_pointer_move(Vec2::new(*x, *y));
        }
        Step::MoveTo { id } => match station_point(m, id) {
            Some(p) => {
                m.on_pointer_move(p);
            }
            None => tracing::warn!(id = %id, "move_to: station not on screen"),
        },
        Step::Click { x, y } => {
            m.on_pointer_click(Vec2::new(*x, *y));
        }
        Step::ClickOn { id } => match station_point(m, id) {
            Some(p) => {
                m.on_pointer_click(p);
            }
            None => tracing::warn!(id = %id, "click_on: station not on screen"),
        },
        Step::FilterKind { kind } => {
            m.filter_by_kind(*kind);
        }
        Step::FilterStatus { status } => {
            m.filter_by_status(*status);
        }
        Step::Filter { kind, status } => {
            m.apply_filter(&OverlayFilter {
                kind: *kind,
                status: *status,
            });
        }
        Step::Focus { id } => {
            m.focus_overlay(id);
        }
        Step::FocusRegion { lng, lat, height_m } => {
            m.focus_region(LonLat::new(*lng, *lat), *height_m);
        }
        Step::Home => m.focus_home(),
        Step::Clear => m.clear(),
        Step::Reload => {
            m.load(directory.clone());
        }
    }
}

fn report(m: &mut HeadlessManager) -> SessionReport {
    let camera = m.surface().camera();
    SessionReport {
        overlays: m.registry().len(),
        visible: m.registry().all().filter(|o| o.visible).count(),
        hovered_id: m.state().hovered_id.clone(),
        selected_id: m.state().selected_id.clone(),
        camera: CameraReport {
            lng: camera.center.lon_deg,
            lat: camera.center.lat_deg,
            height_m: camera.height_m,
        },
        panels: m.sink().clone(),
        events: m.drain_events(),
    }
}

#[cfg(test)]
mod tests {
    use super::{Step, parse_script, run};
    use pretty_assertions::assert_eq;
    use scene::ViewConfig;
    use stations::{StationDirectory, StationKind};

    const FEED: &str = r#"[
        {"id":"res_001","name":"Ulugqat Reservoir","type":"reservoir","lng":85.0,"lat":41.5,
         "waterLevel":1962.5,"warningLevel":1965,"guaranteeLevel":1968,"inflow":125,"outflow":110,"status":"normal"},
        {"id":"rain_002","name":"Ili Valley Gauge","type":"rain","lng":86.5,"lat":41.5,
         "rainfall":25.0,"rainfallTotal":320.0,"status":"warning"}
    ]"#;

    #[test]
    fn parses_tagged_steps() {
        let steps = parse_script(
            r#"[{"op":"move_to","id":"res_001"},{"op":"filter_kind","kind":"rain-gauge"},
                {"op":"filter_kind","kind":null},{"op":"filter","status":"warning"},{"op":"home"}]"#,
        )
        .expect("script");
        assert_eq!(steps[0], Step::MoveTo { id: "res_001".into() });
        assert_eq!(
            steps[1],
            Step::FilterKind {
                kind: Some(StationKind::RainGauge)
            }
        );
        assert_eq!(steps[2], Step::FilterKind { kind: None });
        assert_eq!(steps.len(), 5);
        assert!(parse_script(r#"[{"op":"teleport"}]"#).is_err());
    }

    #[test]
    fn replay_selects_and_reports() {
        let dir = StationDirectory::from_json_str(FEED).expect("feed");
        let steps = parse_script(
            r#"[{"op":"move_to","id":"rain_002"},{"op":"click_on","id":"res_001"},
                {"op":"click","x":2,"y":2},{"op":"filter_kind","kind":"reservoir"},
                {"op":"focus","id":"missing_id"}]"#,
        )
        .expect("script");

        let report = run(&ViewConfig::default(), dir, &steps);
        assert_eq!(report.overlays, 2);
        assert_eq!(report.visible, 1);
        assert_eq!(report.selected_id.as_deref(), Some("res_001"));
        assert_eq!(report.hovered_id, None);
        assert_eq!(report.panels.len(), 1);
        assert_eq!(report.panels[0].station_id, "res_001");
        assert_eq!(report.camera.height_m, 3_000_000.0);
    }

    #[test]
    fn clear_then_reload_restores_overlays() {
        let dir = StationDirectory::from_json_str(FEED).expect("feed");
        let steps = parse_script(r#"[{"op":"clear"},{"op":"reload"}]"#).expect("script");
        let report = run(&ViewConfig::default(), dir, &steps);
        assert_eq!(report.overlays, 2);
        assert_eq!(report.visible, 2);
    }
}
