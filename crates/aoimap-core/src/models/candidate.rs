use serde::{Deserialize, Serialize};

use super::geometry::{BoundingBox, LonLat, Ring};

/// A single place match returned by the geocoder.
///
/// Transient: a candidate is converted into an [`super::Area`] on selection
/// and never persisted itself. Which of the optional geometries is present
/// decides the conversion branch in [`crate::geo::convert`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCandidate {
    /// Full display label, e.g. "Cologne, North Rhine-Westphalia, Germany".
    pub display_name: String,
    /// Representative point, when the geocoder supplied parseable
    /// coordinates.
    pub point: Option<LonLat>,
    /// Extent reported by the geocoder.
    pub bounding_box: Option<BoundingBox>,
    /// Outline ring in (lon, lat) order, present when the geocoder returned
    /// a simple polygon.
    pub polygon: Option<Ring>,
}

impl SearchCandidate {
    /// Short label for dropdown-style listings: the part before the first
    /// comma of the display name.
    pub fn short_name(&self) -> &str {
        self.display_name.split(',').next().unwrap_or(&self.display_name).trim()
    }
}
