//! Port trait definitions
//!
//! These traits define the interfaces the external collaborators implement:
//! the geocoding service, the key-value persistence store, and the map
//! renderer.

use async_trait::async_trait;

use crate::error::Result;
use crate::geo::boundary::LatLon;
use crate::models::{BoundingBox, LonLat, SearchCandidate};

/// Port for the place-name search service.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Find candidates for a free-text query, best match first.
    async fn search(&self, query: &str) -> Result<Vec<SearchCandidate>>;
}

/// Port for the string key-value store backing session persistence.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Where the renderer should move the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Focus {
    /// Fit the given extent.
    Bounds(BoundingBox),
    /// Fly to a point.
    Point(LonLat),
    /// Return to the configured home position.
    Home,
}

/// A visible area's ring plus display color, already in renderer (lat, lon)
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaOutline {
    pub id: String,
    pub ring: Vec<LatLon>,
    pub color: String,
}

/// Port for the map renderer. Outbound commands only; pointer events come
/// back through the application's event stream.
pub trait MapRenderer: Send {
    /// Replace the drawn area overlays with the given visible set.
    fn show_areas(&mut self, areas: &[AreaOutline]);

    /// Show (or, with `None`, clear) the selected candidate's preview ring.
    fn show_preview(&mut self, ring: Option<&[LatLon]>);

    /// Redraw the open sketch polyline while drawing.
    fn show_sketch(&mut self, path: &[LatLon]);

    /// Native double-click zoom must be off while drawing, so the closing
    /// double-click is not also read as a zoom gesture.
    fn set_double_click_zoom(&mut self, enabled: bool);

    /// Move the viewport.
    fn focus(&mut self, focus: Focus);
}
