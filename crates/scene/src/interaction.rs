use layers::OverlayRegistry;

use crate::surface::{Cursor, PickedObject, RenderSurface, ScreenPoint};

/// Hover and selection for the active view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionState {
    pub hovered_id: Option<String>,
    pub selected_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoverChange {
    Unchanged,
    Entered {
        previous: Option<String>,
        id: String,
    },
    Left {
        id: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    Selected(String),
    /// Empty click with deselect enabled; carries the id that was selected.
    Deselected(String),
    Missed,
}

/// Maps pointer events to hover/selection transitions.
///
/// Highlight invariant: the previous hover target is reset before the new
/// one is highlighted, inside a single call, so at most one overlay is ever
/// enlarged.
#[derive(Debug, Default)]
pub struct InteractionController {
    state: InteractionState,
    deselect_on_empty_click: bool,
}

impl InteractionController {
    pub fn new(deselect_on_empty_click: bool) -> Self {
        Self {
            state: InteractionState::default(),
            deselect_on_empty_click,
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Hit-tests `point` and keeps only hits on visible, registered overlays.
    pub fn resolve_hit<S: RenderSurface>(
        registry: &OverlayRegistry,
        surface: &S,
        point: ScreenPoint,
    ) -> Option<String> {
        match surface.hit_test(point)? {
            PickedObject::Overlay(id) if registry.get(&id).is_some_and(|o| o.visible) => Some(id),
            PickedObject::Overlay(_) | PickedObject::Foreign => None,
        }
    }

    pub fn on_pointer_move<S: RenderSurface>(
        &mut self,
        registry: &mut OverlayRegistry,
        surface: &mut S,
        point: ScreenPoint,
    ) -> HoverChange {
        let hit = Self::resolve_hit(registry, surface, point);

        match hit {
            Some(id) if self.state.hovered_id.as_deref() == Some(id.as_str()) => {
                HoverChange::Unchanged
            }
            Some(id) => {
                let previous = self.unhighlight_hovered(registry, surface);
                registry.set_highlighted(&id, true);
                if let Some(o) = registry.get(&id) {
                    surface.update_marker(o);
                }
                surface.set_cursor(Cursor::Pointer);
                tracing::debug!(id = %id, previous = ?previous, "hover entered");
                self.state.hovered_id = Some(id.clone());
                HoverChange::Entered { previous, id }
            }
            None => match self.reset_hover(registry, surface) {
                Some(id) => HoverChange::Left { id },
                None => HoverChange::Unchanged,
            },
        }
    }

    pub fn on_pointer_click<S: RenderSurface>(
        &mut self,
        registry: &OverlayRegistry,
        surface: &S,
        point: ScreenPoint,
    ) -> ClickOutcome {
        if let Some(id) = Self::resolve_hit(registry, surface, point) {
            tracing::debug!(id = %id, "selected");
            self.state.selected_id = Some(id.clone());
            return ClickOutcome::Selected(id);
        }
        if self.deselect_on_empty_click
            && let Some(id) = self.state.selected_id.take()
        {
            tracing::debug!(id = %id, "deselected on empty click");
            return ClickOutcome::Deselected(id);
        }
        ClickOutcome::Missed
    }

    /// Drops the hover highlight, if any, and restores the default cursor.
    ///
    /// Returns the id that was hovered.
    pub fn reset_hover<S: RenderSurface>(
        &mut self,
        registry: &mut OverlayRegistry,
        surface: &mut S,
    ) -> Option<String> {
        let id = self.unhighlight_hovered(registry, surface)?;
        surface.set_cursor(Cursor::Default);
        tracing::debug!(id = %id, "hover left");
        Some(id)
    }

    fn unhighlight_hovered<S: RenderSurface>(
        &mut self,
        registry: &mut OverlayRegistry,
        surface: &mut S,
    ) -> Option<String> {
        let id = self.state.hovered_id.take()?;
        if registry.set_highlighted(&id, false)
            && let Some(o) = registry.get(&id)
        {
            surface.update_marker(o);
        }
        Some(id)
    }

    /// Forgets hover and selection without touching the registry; used when
    /// the overlays themselves are going away.
    pub fn reset(&mut self) {
        self.state = InteractionState::default();
    }
}
