use serde::{Deserialize, Serialize};

use super::geometry::Polygon;

/// How an area came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaOrigin {
    /// Derived from a geocoding candidate.
    Search,
    /// Hand-drawn on the map.
    Drawn,
}

/// Fill colors handed out to new areas.
pub const AREA_COLORS: [&str; 6] = [
    "#FFD700", // gold
    "#FF6B6B", // red
    "#4ECDC4", // teal
    "#45B7D1", // blue
    "#FFA07A", // light orange
    "#98D8C8", // mint
];

/// A persisted Area of Interest.
///
/// Immutable after creation except for `visible`, which only the registry
/// flips. Deletion removes the record outright; there are no tombstones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    /// Opaque identifier, unique within a session.
    pub id: String,
    /// Display label, `"Area N"` at creation. Not renumbered on delete, so
    /// labels can repeat.
    pub name: String,
    pub origin: AreaOrigin,
    /// One closed ring.
    pub geometry: Polygon,
    pub visible: bool,
    /// Hex color from [`AREA_COLORS`].
    pub color: String,
}
