//! Canonical geometry types for AOI rings.
//!
//! Stored coordinates are (longitude, latitude) degree pairs throughout the
//! crate. The renderer-facing (lat, lon) order exists only behind
//! [`crate::geo::boundary`]; nothing else may swap the axes.

use serde::{Deserialize, Serialize};

/// A (longitude, latitude) pair in degrees, serialized as `[lon, lat]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LonLat(pub f64, pub f64);

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self(lon, lat)
    }

    pub fn lon(&self) -> f64 {
        self.0
    }

    pub fn lat(&self) -> f64 {
        self.1
    }
}

/// Ordered boundary of a single-part polygon.
///
/// A well-formed ring has at least 4 points and repeats its first point at
/// the end (explicit closure).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ring(pub Vec<LonLat>);

impl Ring {
    pub fn new(points: Vec<LonLat>) -> Self {
        Self(points)
    }

    /// Close an open vertex path by repeating its first point at the end.
    pub fn closed(mut points: Vec<LonLat>) -> Self {
        if let Some(first) = points.first().copied() {
            points.push(first);
        }
        Self(points)
    }

    pub fn points(&self) -> &[LonLat] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First and last point identical, with enough points for a polygon.
    pub fn is_closed(&self) -> bool {
        self.0.len() >= 4 && self.0.first() == self.0.last()
    }
}

/// A polygon as a sequence of rings, serialized as the nested-array GeoJSON
/// shape `{"coordinates": [[[lon, lat], ...]]}`.
///
/// Only single-ring polygons are produced here; the container leaves room
/// for multi-ring formats without a schema change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub coordinates: Vec<Ring>,
}

impl Polygon {
    pub fn from_ring(ring: Ring) -> Self {
        Self { coordinates: vec![ring] }
    }

    /// The outer (and, here, only) ring.
    pub fn outer(&self) -> Option<&Ring> {
        self.coordinates.first()
    }
}

/// Extent in degrees as reported by the geocoder: south, north, west, east.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub south: f64,
    pub north: f64,
    pub west: f64,
    pub east: f64,
}
