use std::collections::VecDeque;

use foundation::LonLat;
use layers::{FilterOutcome, OverlayFactory, OverlayFilter, OverlayRegistry};
use stations::{StationDirectory, StationKind, StationStatus};

use crate::camera::CameraDirector;
use crate::config::ViewConfig;
use crate::events::{InteractionEvent, InteractionLog, LoggedEvent};
use crate::interaction::{ClickOutcome, HoverChange, InteractionController, InteractionState};
use crate::panel::{DetailPanel, describe};
use crate::surface::{Cursor, DetailSink, RenderSurface, ScreenPoint};

/// Station markers, their interaction state and camera control for one view.
///
/// The manager is the only mutator of its registry. Every handler runs to
/// completion before the next one, so no caller observes a half-applied
/// hover transition.
pub struct StationOverlayManager<S: RenderSurface, D: DetailSink> {
    surface: S,
    sink: D,
    directory: StationDirectory,
    registry: OverlayRegistry,
    controller: InteractionController,
    camera: CameraDirector,
    log: InteractionLog,
    last_panel: Option<DetailPanel>,
}

impl<S: RenderSurface, D: DetailSink> StationOverlayManager<S, D> {
    pub fn new(surface: S, sink: D, config: &ViewConfig) -> Self {
        Self {
            surface,
            sink,
            directory: StationDirectory::new(),
            registry: OverlayRegistry::with_factory(OverlayFactory::with_config(
                config.marker_style(),
            )),
            controller: InteractionController::new(config.deselect_on_empty_click),
            camera: CameraDirector::from_config(config),
            log: InteractionLog::with_capacity(config.event_log_capacity),
            last_panel: None,
        }
    }

    /// Loads `directory` and flies to the home region.
    pub fn init(&mut self, directory: StationDirectory) {
        self.load(directory);
        self.camera.focus_home(&mut self.surface);
    }

    /// Replaces every overlay with one per station in `directory`.
    pub fn load(&mut self, directory: StationDirectory) -> usize {
        self.clear();
        self.directory = directory;
        self.registry.add_all(self.directory.iter());
        for overlay in self.registry.all() {
            self.surface.add_marker(overlay);
        }
        let count = self.registry.len();
        tracing::info!(count, "station overlays loaded");
        self.log.emit(InteractionEvent::Loaded { count });
        count
    }

    pub fn on_pointer_move(&mut self, point: ScreenPoint) -> HoverChange {
        let change = self
            .controller
            .on_pointer_move(&mut self.registry, &mut self.surface, point);
        match &change {
            HoverChange::Entered { previous, id } => {
                if let Some(prev) = previous {
                    self.log.emit(InteractionEvent::HoverLeft { id: prev.clone() });
                }
                self.log.emit(InteractionEvent::HoverEntered { id: id.clone() });
            }
            HoverChange::Left { id } => {
                self.log.emit(InteractionEvent::HoverLeft { id: id.clone() });
            }
            HoverChange::Unchanged => {}
        }
        change
    }

    /// Selects the overlay under `point` and emits its detail panel.
    ///
    /// Returns the panel composed by this click, if any.
    pub fn on_pointer_click(&mut self, point: ScreenPoint) -> Option<&DetailPanel> {
        match self
            .controller
            .on_pointer_click(&self.registry, &self.surface, point)
        {
            ClickOutcome::Selected(id) => {
                self.log.emit(InteractionEvent::Selected { id: id.clone() });
                let station = self.directory.get(&id)?;
                let panel = describe(station);
                self.sink.show(&panel);
                self.last_panel = Some(panel);
                self.last_panel.as_ref()
            }
            ClickOutcome::Deselected(id) => {
                self.log.emit(InteractionEvent::Deselected { id });
                self.last_panel = None;
                None
            }
            ClickOutcome::Missed => None,
        }
    }

    pub fn filter_by_kind(&mut self, kind: Option<StationKind>) -> FilterOutcome {
        self.apply_filter(&OverlayFilter::by_kind(kind))
    }

    pub fn filter_by_status(&mut self, status: Option<StationStatus>) -> FilterOutcome {
        self.apply_filter(&OverlayFilter::by_status(status))
    }

    /// Recomputes visibility from `filter` and pushes changes to the surface.
    ///
    /// Overlays are never destroyed. If the hovered overlay becomes hidden its
    /// highlight is dropped; selection is left alone.
    pub fn apply_filter(&mut self, filter: &OverlayFilter) -> FilterOutcome {
        let outcome = self.registry.apply_filter(filter);

        if let Some(hovered) = self.controller.state().hovered_id.clone()
            && self.registry.get(&hovered).is_some_and(|o| !o.visible)
            && let Some(id) = self.controller.reset_hover(&mut self.registry, &mut self.surface)
        {
            self.log.emit(InteractionEvent::HoverLeft { id });
        }

        for id in &outcome.changed {
            if let Some(o) = self.registry.get(id) {
                self.surface.update_marker(o);
            }
        }

        tracing::debug!(
            kind = ?filter.kind,
            status = ?filter.status,
            visible = outcome.visible,
            "filter applied"
        );
        self.log.emit(InteractionEvent::FilterApplied {
            kind: filter.kind,
            status: filter.status,
            visible: outcome.visible,
        });
        outcome
    }

    pub fn focus_region(&mut self, center: LonLat, height_m: f64) {
        self.camera.focus_region(&mut self.surface, center, height_m);
        self.log.emit(InteractionEvent::Focused { id: None });
    }

    pub fn focus_home(&mut self) {
        self.camera.focus_home(&mut self.surface);
        self.log.emit(InteractionEvent::Focused { id: None });
    }

    /// Flies to overlay `id`; unknown ids are a silent no-op.
    pub fn focus_overlay(&mut self, id: &str) -> bool {
        let flew = self
            .camera
            .focus_overlay(&self.registry, &mut self.surface, id);
        let event = if flew {
            InteractionEvent::Focused {
                id: Some(id.to_string()),
            }
        } else {
            InteractionEvent::FocusSkipped { id: id.to_string() }
        };
        self.log.emit(event);
        flew
    }

    /// Removes every overlay and resets hover/selection. Safe at any time.
    pub fn clear(&mut self) {
        let had_overlays = !self.registry.is_empty();
        self.controller.reset();
        self.surface.remove_all_markers();
        self.surface.set_cursor(Cursor::Default);
        self.registry.clear();
        self.last_panel = None;
        if had_overlays {
            tracing::info!("station overlays cleared");
            self.log.emit(InteractionEvent::Cleared);
        }
    }

    /// Clears the view and releases the directory.
    pub fn teardown(&mut self) {
        self.clear();
        self.directory = StationDirectory::new();
    }

    pub fn state(&self) -> &InteractionState {
        self.controller.state()
    }

    pub fn registry(&self) -> &OverlayRegistry {
        &self.registry
    }

    pub fn directory(&self) -> &StationDirectory {
        &self.directory
    }

    /// Panel of the current selection, if it was composed by a click.
    pub fn selected_panel(&self) -> Option<&DetailPanel> {
        self.last_panel.as_ref()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn sink(&self) -> &D {
        &self.sink
    }

    pub fn events(&self) -> &VecDeque<LoggedEvent> {
        self.log.events()
    }

    pub fn drain_events(&mut self) -> Vec<LoggedEvent> {
        self.log.drain()
    }
}
