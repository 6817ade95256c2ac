//! Sidebar panel and base layer orchestration.

use crate::models::{AreaOrigin, MapView, ViewMode};

/// The two coupled view toggles.
///
/// Both enums are two-valued, so every state is legal; transitions are the
/// only behavior worth encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewState {
    pub map_view: MapView,
    pub view_mode: ViewMode,
}

impl ViewState {
    pub fn new(map_view: MapView, view_mode: ViewMode) -> Self {
        Self { map_view, view_mode }
    }

    /// Explicit user navigation between sidebar panels.
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    /// Explicit user toggle between street and satellite.
    pub fn toggle_map_view(&mut self) {
        self.map_view = self.map_view.toggled();
    }

    /// Fired whenever an area lands in the registry.
    ///
    /// Always moves the sidebar to project scope. A search-derived area also
    /// forces satellite imagery so the imported outline can be checked
    /// against it.
    pub fn area_created(&mut self, origin: AreaOrigin) {
        self.view_mode = ViewMode::ProjectScope;
        if origin == AreaOrigin::Search {
            self.map_view = MapView::Satellite;
        }
    }
}
