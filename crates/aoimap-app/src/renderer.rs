//! Renderer adapter that narrates draw commands through tracing.
//!
//! The actual tile/vector surface lives outside this process; this adapter
//! is the boundary where outlines leave the application, already converted
//! to the renderer's (lat, lon) order.

use aoimap_core::config::MapPosition;
use aoimap_core::geo::boundary::LatLon;
use aoimap_core::ports::{AreaOutline, Focus, MapRenderer};

pub struct TraceRenderer {
    home: MapPosition,
}

impl TraceRenderer {
    pub fn new(home: MapPosition) -> Self {
        Self { home }
    }
}

impl MapRenderer for TraceRenderer {
    fn show_areas(&mut self, areas: &[AreaOutline]) {
        tracing::debug!(count = areas.len(), "area overlays updated");
    }

    fn show_preview(&mut self, ring: Option<&[LatLon]>) {
        match ring {
            Some(ring) => tracing::debug!(vertices = ring.len(), "candidate preview shown"),
            None => tracing::debug!("candidate preview cleared"),
        }
    }

    fn show_sketch(&mut self, path: &[LatLon]) {
        tracing::debug!(vertices = path.len(), "sketch polyline updated");
    }

    fn set_double_click_zoom(&mut self, enabled: bool) {
        tracing::debug!(enabled, "double-click zoom toggled");
    }

    fn focus(&mut self, focus: Focus) {
        match focus {
            Focus::Bounds(b) => tracing::debug!(
                south = b.south,
                north = b.north,
                west = b.west,
                east = b.east,
                "viewport fit to bounds"
            ),
            Focus::Point(p) => {
                tracing::debug!(lat = p.lat(), lon = p.lon(), "viewport flown to point")
            }
            Focus::Home => tracing::debug!(
                lat = self.home.lat,
                lon = self.home.lon,
                zoom = self.home.zoom,
                "viewport reset to home"
            ),
        }
    }
}
