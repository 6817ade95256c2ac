//! Normalizes heterogeneous geocoder geometries into a single closed ring.

use crate::error::{AoimapError, Result};
use crate::models::{LonLat, Polygon, Ring, SearchCandidate};

/// Half-width in degrees of the square built around point-only candidates.
/// Roughly 1 km at mid-latitudes; intentionally not latitude-corrected.
pub const POINT_FALLBACK_OFFSET_DEG: f64 = 0.01;

/// Convert a search candidate into a single closed polygon ring.
///
/// Branch priority: the candidate's own polygon outline verbatim, then a
/// rectangle from its bounding box, then a fixed-size square around its
/// point. A candidate with none of the three has no usable geometry and no
/// area is created from it.
pub fn outline_polygon(candidate: &SearchCandidate) -> Result<Polygon> {
    if let Some(ring) = &candidate.polygon {
        // Already lon-lat and already closed; taken as-is, no validation.
        return Ok(Polygon::from_ring(ring.clone()));
    }

    if let Some(bbox) = candidate.bounding_box {
        // Counter-clockwise from the south-west corner. Reversing this
        // order mirrors the fill under renderers that assume clockwise
        // winding.
        let ring = Ring::new(vec![
            LonLat::new(bbox.west, bbox.south),
            LonLat::new(bbox.east, bbox.south),
            LonLat::new(bbox.east, bbox.north),
            LonLat::new(bbox.west, bbox.north),
            LonLat::new(bbox.west, bbox.south),
        ]);
        return Ok(Polygon::from_ring(ring));
    }

    if let Some(point) = candidate.point {
        let (lon, lat) = (point.lon(), point.lat());
        let d = POINT_FALLBACK_OFFSET_DEG;
        let ring = Ring::new(vec![
            LonLat::new(lon - d, lat - d),
            LonLat::new(lon + d, lat - d),
            LonLat::new(lon + d, lat + d),
            LonLat::new(lon - d, lat + d),
            LonLat::new(lon - d, lat - d),
        ]);
        return Ok(Polygon::from_ring(ring));
    }

    Err(AoimapError::MissingGeometry {
        candidate: candidate.display_name.clone(),
    })
}
