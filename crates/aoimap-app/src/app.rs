//! The single-threaded application controller.
//!
//! All session state lives here and mutates only inside [`Controller::handle`],
//! which consumes one event at a time. Debounce timers and geocoding requests
//! run as spawned tasks that post their outcome back as events, so the loop
//! itself never blocks and read-modify-write sequences are atomic by
//! construction.

use std::sync::Arc;

use tokio::sync::mpsc;

use aoimap_core::draw::DrawTool;
use aoimap_core::geo::{boundary, convert};
use aoimap_core::models::{
    Area, AreaOrigin, Polygon, SearchCandidate, SessionSnapshot, ViewMode,
};
use aoimap_core::ports::{AreaOutline, Focus, Geocoder, KeyValueStore, MapRenderer};
use aoimap_core::registry::AreaRegistry;
use aoimap_core::search::{InputAction, SearchGuard, DEBOUNCE};
use aoimap_core::view::ViewState;
use aoimap_store::session;

/// Everything the event loop can react to.
#[derive(Debug)]
pub enum AppEvent {
    /// Raw text change in the search box.
    SearchInput(String),
    /// A debounce window elapsed for the given input generation.
    DebounceElapsed { generation: u64, query: String },
    /// A geocoding request resolved.
    SearchResolved {
        seq: u64,
        outcome: aoimap_core::Result<Vec<SearchCandidate>>,
    },
    /// The user picked a result from the dropdown (zero-based).
    SelectCandidate(usize),
    /// Apply the selected candidate's outline as a new area.
    ApplyOutline,
    /// Enter or leave draw mode.
    ToggleDrawMode,
    /// Map click at (lat, lon).
    MapClick { lat: f64, lon: f64 },
    /// Map double-click: try to close the sketch.
    MapDoubleClick,
    /// Switch between street and satellite.
    ToggleMapView,
    /// Explicit sidebar navigation.
    SetViewMode(ViewMode),
    /// Flip one area's visibility.
    ToggleVisibility(String),
    /// Remove one area.
    DeleteArea(String),
    /// Clear search state and re-home the viewport.
    Restart,
}

/// Owns all mutable session state and funnels every mutation.
pub struct Controller {
    registry: AreaRegistry,
    view: ViewState,
    draw: DrawTool,
    guard: SearchGuard,
    debounce_generation: u64,
    candidate: Option<SearchCandidate>,
    results: Vec<SearchCandidate>,
    searching: bool,
    geocoder: Arc<dyn Geocoder>,
    store: Arc<dyn KeyValueStore>,
    renderer: Box<dyn MapRenderer>,
    events: mpsc::UnboundedSender<AppEvent>,
}

impl Controller {
    /// Hydrate session state from the store and wire the collaborators.
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        store: Arc<dyn KeyValueStore>,
        mut renderer: Box<dyn MapRenderer>,
        events: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        let snapshot = session::load(store.as_ref());
        tracing::info!(
            areas = snapshot.areas.len(),
            map_view = ?snapshot.map_view,
            view_mode = ?snapshot.view_mode,
            "session hydrated"
        );

        let view = ViewState::new(snapshot.map_view, snapshot.view_mode);
        let registry = AreaRegistry::from_areas(snapshot.areas);
        renderer.show_areas(&outlines(&registry));

        Self {
            registry,
            view,
            draw: DrawTool::new(),
            guard: SearchGuard::new(),
            debounce_generation: 0,
            candidate: None,
            results: Vec::new(),
            searching: false,
            geocoder,
            store,
            renderer,
            events,
        }
    }

    /// Drain the event stream until every sender is gone.
    pub async fn run(mut self, mut rx: mpsc::UnboundedReceiver<AppEvent>) {
        while let Some(event) = rx.recv().await {
            self.handle(event);
        }
    }

    pub fn handle(&mut self, event: AppEvent) {
        match event {
            AppEvent::SearchInput(text) => self.on_search_input(&text),
            AppEvent::DebounceElapsed { generation, query } => {
                self.on_debounce_elapsed(generation, &query)
            }
            AppEvent::SearchResolved { seq, outcome } => self.on_search_resolved(seq, outcome),
            AppEvent::SelectCandidate(index) => self.on_select_candidate(index),
            AppEvent::ApplyOutline => self.on_apply_outline(),
            AppEvent::ToggleDrawMode => self.on_toggle_draw_mode(),
            AppEvent::MapClick { lat, lon } => self.on_map_click(lat, lon),
            AppEvent::MapDoubleClick => self.on_map_double_click(),
            AppEvent::ToggleMapView => {
                self.view.toggle_map_view();
                self.sync();
            }
            AppEvent::SetViewMode(mode) => {
                self.view.set_view_mode(mode);
                self.sync();
            }
            AppEvent::ToggleVisibility(id) => {
                self.registry.toggle_visibility(&id);
                self.sync();
            }
            AppEvent::DeleteArea(id) => {
                self.registry.delete(&id);
                self.sync();
            }
            AppEvent::Restart => self.on_restart(),
        }
    }

    fn on_search_input(&mut self, text: &str) {
        match self.guard.on_input(text) {
            InputAction::ClearResults => {
                self.results.clear();
            }
            InputAction::Debounce(query) => {
                self.debounce_generation += 1;
                let generation = self.debounce_generation;
                let events = self.events.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(DEBOUNCE).await;
                    let _ = events.send(AppEvent::DebounceElapsed { generation, query });
                });
            }
        }
    }

    fn on_debounce_elapsed(&mut self, generation: u64, query: &str) {
        if generation != self.debounce_generation {
            // Superseded by newer input before the window elapsed.
            return;
        }
        let Some(ticket) = self.guard.try_issue(query) else {
            return;
        };

        self.searching = true;
        let geocoder = Arc::clone(&self.geocoder);
        let events = self.events.clone();
        tokio::spawn(async move {
            let outcome = geocoder.search(&ticket.query).await;
            let _ = events.send(AppEvent::SearchResolved { seq: ticket.seq, outcome });
        });
    }

    fn on_search_resolved(
        &mut self,
        seq: u64,
        outcome: aoimap_core::Result<Vec<SearchCandidate>>,
    ) {
        self.searching = false;
        if !self.guard.accept_response(seq) {
            tracing::debug!(seq, "stale search response dropped");
            return;
        }
        self.results = match outcome {
            Ok(results) => results,
            Err(e) => {
                // Failures read as "no results"; the session keeps going.
                tracing::warn!(error = %e, "search failed");
                Vec::new()
            }
        };
    }

    fn on_select_candidate(&mut self, index: usize) {
        let Some(candidate) = self.results.get(index).cloned() else {
            tracing::debug!(index, "selection out of range");
            return;
        };
        self.results.clear();
        self.guard.reset();

        match convert::outline_polygon(&candidate)
            .ok()
            .as_ref()
            .and_then(|polygon| polygon.outer())
        {
            Some(ring) => self.renderer.show_preview(Some(&boundary::render_ring(ring))),
            None => self.renderer.show_preview(None),
        }

        if let Some(bbox) = candidate.bounding_box {
            self.renderer.focus(Focus::Bounds(bbox));
        } else if let Some(point) = candidate.point {
            self.renderer.focus(Focus::Point(point));
        }

        self.candidate = Some(candidate);
    }

    fn on_apply_outline(&mut self) {
        let Some(candidate) = self.candidate.take() else {
            return;
        };
        if let Err(e) = self.registry.create_from_search(&candidate).map(|_| ()) {
            // Creation aborted; the selection stays so the user can pick
            // something else or retry.
            tracing::warn!(error = %e, "cannot derive an outline for the selected place");
            self.candidate = Some(candidate);
            return;
        }
        self.guard.reset();
        self.view.area_created(AreaOrigin::Search);
        self.renderer.show_preview(None);
        self.sync();
    }

    fn on_toggle_draw_mode(&mut self) {
        if self.draw.is_drawing() {
            self.draw.cancel();
            self.renderer.show_sketch(&[]);
            self.renderer.set_double_click_zoom(true);
        } else {
            self.draw.begin();
            // A pending search preview and drawing are mutually exclusive.
            self.candidate = None;
            self.renderer.show_preview(None);
            self.renderer.set_double_click_zoom(false);
        }
    }

    fn on_map_click(&mut self, lat: f64, lon: f64) {
        let point = boundary::event_point(lat, lon);
        if let Some(path) = self.draw.click(point) {
            let rendered = boundary::render_path(path);
            self.renderer.show_sketch(&rendered);
        }
    }

    fn on_map_double_click(&mut self) {
        if let Some(ring) = self.draw.finish() {
            self.registry.create_from_drawing(Polygon::from_ring(ring));
            self.view.area_created(AreaOrigin::Drawn);
            self.renderer.show_sketch(&[]);
            self.renderer.set_double_click_zoom(true);
            self.sync();
        }
        // Otherwise: fewer than three vertices or not drawing; ignored.
    }

    fn on_restart(&mut self) {
        self.candidate = None;
        self.results.clear();
        self.guard.reset();
        self.renderer.show_preview(None);
        self.renderer.focus(Focus::Home);
    }

    /// Write the snapshot and refresh the overlays. Runs after every
    /// mutation of the {areas, mapView, viewMode} triple.
    fn sync(&mut self) {
        let snapshot = self.snapshot();
        if let Err(e) = session::save(self.store.as_ref(), &snapshot) {
            tracing::warn!(error = %e, "failed to persist session");
        }
        self.renderer.show_areas(&outlines(&self.registry));
    }

    /// The persisted triple as currently held.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            areas: self.registry.areas().to_vec(),
            map_view: self.view.map_view,
            view_mode: self.view.view_mode,
        }
    }

    pub fn areas(&self) -> &[Area] {
        self.registry.areas()
    }

    pub fn results(&self) -> &[SearchCandidate] {
        &self.results
    }

    pub fn candidate(&self) -> Option<&SearchCandidate> {
        self.candidate.as_ref()
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn is_drawing(&self) -> bool {
        self.draw.is_drawing()
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }
}

fn outlines(registry: &AreaRegistry) -> Vec<AreaOutline> {
    registry
        .visible()
        .filter_map(|area| {
            area.geometry.outer().map(|ring| AreaOutline {
                id: area.id.clone(),
                ring: boundary::render_ring(ring),
                color: area.color.clone(),
            })
        })
        .collect()
}
