//! The single place where storage (lon, lat) order meets the renderer's
//! (lat, lon) order. No other module swaps coordinate axes.

use crate::models::{LonLat, Ring};

/// A (latitude, longitude) pair as consumed and produced by the renderer.
pub type LatLon = [f64; 2];

/// Convert a stored ring to renderer order.
pub fn render_ring(ring: &Ring) -> Vec<LatLon> {
    render_path(ring.points())
}

/// Convert an open vertex path (an in-progress sketch) to renderer order.
pub fn render_path(points: &[LonLat]) -> Vec<LatLon> {
    points.iter().map(|p| [p.lat(), p.lon()]).collect()
}

/// Convert a pointer event's (lat, lon) into the stored order.
pub fn event_point(lat: f64, lon: f64) -> LonLat {
    LonLat::new(lon, lat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_order_swaps_axes() {
        let ring = Ring::new(vec![LonLat::new(6.5, 50.0), LonLat::new(7.5, 51.0)]);
        assert_eq!(render_ring(&ring), vec![[50.0, 6.5], [51.0, 7.5]]);
    }

    #[test]
    fn test_event_point_roundtrip() {
        let stored = event_point(50.94, 6.95);
        assert_eq!(stored.lon(), 6.95);
        assert_eq!(stored.lat(), 50.94);
        assert_eq!(render_path(&[stored]), vec![[50.94, 6.95]]);
    }
}
