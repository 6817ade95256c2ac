//! Shared test doubles: a scripted geocoder, a command-recording renderer,
//! and a harness that wires them to a controller over an in-memory store.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc;

use aoimap_app::app::{AppEvent, Controller};
use aoimap_core::geo::boundary::LatLon;
use aoimap_core::models::{BoundingBox, LonLat, SearchCandidate};
use aoimap_core::ports::{AreaOutline, Focus, Geocoder, KeyValueStore, MapRenderer};
use aoimap_store::MemoryStore;

/// Geocoder double that records queries and replays a scripted outcome.
pub struct MockGeocoder {
    calls: Mutex<Vec<String>>,
    outcome: Mutex<aoimap_core::Result<Vec<SearchCandidate>>>,
}

impl MockGeocoder {
    pub fn returning(results: Vec<SearchCandidate>) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            outcome: Mutex::new(Ok(results)),
        })
    }

    pub fn failing(reason: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            outcome: Mutex::new(Err(aoimap_core::AoimapError::Search {
                reason: reason.to_string(),
            })),
        })
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Geocoder for MockGeocoder {
    async fn search(&self, query: &str) -> aoimap_core::Result<Vec<SearchCandidate>> {
        self.calls.lock().unwrap().push(query.to_string());
        match &*self.outcome.lock().unwrap() {
            Ok(results) => Ok(results.clone()),
            Err(aoimap_core::AoimapError::Search { reason }) => {
                Err(aoimap_core::AoimapError::Search { reason: reason.clone() })
            }
            Err(_) => unreachable!("mock only scripts search errors"),
        }
    }
}

/// Renderer double exposing the last observed command state.
#[derive(Clone, Default)]
pub struct RecordingRenderer {
    pub state: Arc<Mutex<RendererState>>,
}

pub struct RendererState {
    pub shown_areas: Vec<AreaOutline>,
    pub preview: Option<Vec<LatLon>>,
    pub sketch: Vec<LatLon>,
    pub double_click_zoom: bool,
    pub focus: Option<Focus>,
}

impl Default for RendererState {
    fn default() -> Self {
        Self {
            shown_areas: Vec::new(),
            preview: None,
            sketch: Vec::new(),
            double_click_zoom: true,
            focus: None,
        }
    }
}

impl MapRenderer for RecordingRenderer {
    fn show_areas(&mut self, areas: &[AreaOutline]) {
        self.state.lock().unwrap().shown_areas = areas.to_vec();
    }

    fn show_preview(&mut self, ring: Option<&[LatLon]>) {
        self.state.lock().unwrap().preview = ring.map(<[LatLon]>::to_vec);
    }

    fn show_sketch(&mut self, path: &[LatLon]) {
        self.state.lock().unwrap().sketch = path.to_vec();
    }

    fn set_double_click_zoom(&mut self, enabled: bool) {
        self.state.lock().unwrap().double_click_zoom = enabled;
    }

    fn focus(&mut self, focus: Focus) {
        self.state.lock().unwrap().focus = Some(focus);
    }
}

pub struct Harness {
    pub controller: Controller,
    pub rx: mpsc::UnboundedReceiver<AppEvent>,
    pub geocoder: Arc<MockGeocoder>,
    pub store: Arc<MemoryStore>,
    pub renderer: RecordingRenderer,
}

pub fn harness(geocoder: Arc<MockGeocoder>) -> Harness {
    harness_with_store(geocoder, Arc::new(MemoryStore::new()))
}

pub fn harness_with_store(geocoder: Arc<MockGeocoder>, store: Arc<MemoryStore>) -> Harness {
    let renderer = RecordingRenderer::default();
    let (tx, rx) = mpsc::unbounded_channel();
    let geocoder_port: Arc<dyn Geocoder> = geocoder.clone();
    let store_port: Arc<dyn KeyValueStore> = store.clone();
    let controller = Controller::new(geocoder_port, store_port, Box::new(renderer.clone()), tx);
    Harness { controller, rx, geocoder, store, renderer }
}

impl Harness {
    /// Let spawned tasks run, then feed every queued event back into the
    /// controller until the queue drains.
    pub async fn settle(&mut self) {
        loop {
            for _ in 0..8 {
                tokio::task::yield_now().await;
            }
            match self.rx.try_recv() {
                Ok(event) => self.controller.handle(event),
                Err(_) => break,
            }
        }
    }
}

/// A candidate carrying only a bounding box plus its point.
pub fn bbox_candidate(name: &str) -> SearchCandidate {
    SearchCandidate {
        display_name: name.to_string(),
        point: Some(LonLat::new(6.95, 50.94)),
        bounding_box: Some(BoundingBox { south: 50.0, north: 51.0, west: 6.5, east: 7.5 }),
        polygon: None,
    }
}

/// A candidate with no usable geometry at all.
pub fn empty_candidate(name: &str) -> SearchCandidate {
    SearchCandidate {
        display_name: name.to_string(),
        point: None,
        bounding_box: None,
        polygon: None,
    }
}
