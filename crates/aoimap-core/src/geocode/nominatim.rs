//! Nominatim search adapter.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{AoimapError, Result};
use crate::models::{BoundingBox, LonLat, Ring, SearchCandidate};
use crate::ports::Geocoder;

/// Public Nominatim instance; point at a self-hosted one via configuration.
pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Default number of candidates requested per query.
pub const DEFAULT_LIMIT: usize = 5;

// Nominatim's usage policy requires an identifying User-Agent.
const USER_AGENT: &str = concat!("aoimap/", env!("CARGO_PKG_VERSION"));

pub struct NominatimClient {
    base_url: String,
    limit: usize,
    client: reqwest::Client,
}

impl NominatimClient {
    pub fn new(base_url: impl Into<String>, limit: usize) -> Self {
        Self {
            base_url: base_url.into(),
            limit,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchCandidate>> {
        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[
                ("format", "json"),
                ("q", query),
                ("limit", &self.limit.to_string()),
                ("polygon_geojson", "1"),
            ])
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .map_err(|e| AoimapError::Search { reason: format!("request failed: {e}") })?;

        if !response.status().is_success() {
            return Err(AoimapError::Search {
                reason: format!("service returned {}", response.status()),
            });
        }

        let places: Vec<Place> = response
            .json()
            .await
            .map_err(|e| AoimapError::Search { reason: format!("invalid response body: {e}") })?;

        Ok(places.into_iter().filter_map(Place::into_candidate).collect())
    }
}

/// One raw search hit. Coordinates arrive as strings.
#[derive(Debug, Deserialize)]
struct Place {
    display_name: String,
    lat: String,
    lon: String,
    #[serde(default)]
    boundingbox: Option<[String; 4]>,
    #[serde(default)]
    geojson: Option<geojson::Geometry>,
}

impl Place {
    fn into_candidate(self) -> Option<SearchCandidate> {
        let (Ok(lat), Ok(lon)) = (self.lat.parse::<f64>(), self.lon.parse::<f64>()) else {
            tracing::warn!(
                display_name = %self.display_name,
                "skipping place with unparseable coordinates"
            );
            return None;
        };

        let bounding_box = self.boundingbox.as_ref().and_then(parse_bounding_box);
        let polygon = self.geojson.as_ref().and_then(polygon_ring);

        Some(SearchCandidate {
            display_name: self.display_name,
            point: Some(LonLat::new(lon, lat)),
            bounding_box,
            polygon,
        })
    }
}

/// The wire order is [south, north, west, east], each as a decimal string.
fn parse_bounding_box(raw: &[String; 4]) -> Option<BoundingBox> {
    let [south, north, west, east] = raw;
    Some(BoundingBox {
        south: south.parse().ok()?,
        north: north.parse().ok()?,
        west: west.parse().ok()?,
        east: east.parse().ok()?,
    })
}

/// Only simple polygons contribute an outline; every other geometry type
/// falls through to the bounding-box or point branch downstream.
fn polygon_ring(geometry: &geojson::Geometry) -> Option<Ring> {
    match &geometry.value {
        geojson::Value::Polygon(rings) => rings.first().map(|ring| {
            Ring::new(
                ring.iter()
                    .filter(|position| position.len() >= 2)
                    .map(|position| LonLat::new(position[0], position[1]))
                    .collect(),
            )
        }),
        _ => None,
    }
}
