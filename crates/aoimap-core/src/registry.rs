//! The canonical area list and the only code that mutates it.

use chrono::Utc;

use crate::error::Result;
use crate::geo::convert;
use crate::models::{Area, AreaOrigin, Polygon, SearchCandidate, AREA_COLORS};

/// Issues `area-<millis>` identifiers. When two creations land in the same
/// millisecond the counter is bumped past it, so IDs stay unique within a
/// session.
#[derive(Debug, Default)]
struct IdGenerator {
    last_ms: i64,
}

impl IdGenerator {
    fn next(&mut self) -> String {
        let now = Utc::now().timestamp_millis();
        self.last_ms = if now > self.last_ms { now } else { self.last_ms + 1 };
        format!("area-{}", self.last_ms)
    }
}

/// Owns the ordered area list plus identifier generation, count-based
/// naming, and palette color assignment.
#[derive(Debug, Default)]
pub struct AreaRegistry {
    areas: Vec<Area>,
    ids: IdGenerator,
}

impl AreaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a hydrated snapshot.
    pub fn from_areas(areas: Vec<Area>) -> Self {
        Self { areas, ids: IdGenerator::default() }
    }

    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Area> {
        self.areas.iter().find(|a| a.id == id)
    }

    /// Areas currently shown on the map.
    pub fn visible(&self) -> impl Iterator<Item = &Area> {
        self.areas.iter().filter(|a| a.visible)
    }

    /// Derive an area from a geocoding candidate.
    ///
    /// Fails with `MissingGeometry` when the candidate has no polygon,
    /// bounding box or point; nothing is appended in that case.
    pub fn create_from_search(&mut self, candidate: &SearchCandidate) -> Result<&Area> {
        let polygon = convert::outline_polygon(candidate)?;
        Ok(self.append(AreaOrigin::Search, polygon))
    }

    /// Record a hand-drawn polygon. The draw tool guarantees the ring is
    /// closed with at least four points before this is called.
    pub fn create_from_drawing(&mut self, polygon: Polygon) -> &Area {
        self.append(AreaOrigin::Drawn, polygon)
    }

    fn append(&mut self, origin: AreaOrigin, geometry: Polygon) -> &Area {
        // Count-based naming: deletions do not renumber, so names can repeat.
        let name = format!("Area {}", self.areas.len() + 1);
        let area = Area {
            id: self.ids.next(),
            name,
            origin,
            geometry,
            visible: true,
            color: pick_color().to_string(),
        };
        tracing::info!(id = %area.id, name = %area.name, origin = ?origin, "area created");
        let index = self.areas.len();
        self.areas.push(area);
        &self.areas[index]
    }

    /// Flip visibility. Unknown IDs are ignored: deletion races with the UI
    /// are expected.
    pub fn toggle_visibility(&mut self, id: &str) {
        if let Some(area) = self.areas.iter_mut().find(|a| a.id == id) {
            area.visible = !area.visible;
        }
    }

    /// Remove an area outright. Unknown IDs are ignored.
    pub fn delete(&mut self, id: &str) {
        self.areas.retain(|a| a.id != id);
    }
}

/// Uniform pseudo-random pick from the fixed palette; collisions with
/// existing areas' colors are acceptable.
fn pick_color() -> &'static str {
    let entropy = Utc::now().timestamp_subsec_nanos() as usize;
    AREA_COLORS[entropy % AREA_COLORS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BoundingBox, LonLat, Ring};

    fn drawn_ring() -> Ring {
        Ring::closed(vec![
            LonLat::new(6.0, 50.0),
            LonLat::new(7.0, 50.0),
            LonLat::new(6.5, 51.0),
        ])
    }

    fn bbox_candidate() -> SearchCandidate {
        SearchCandidate {
            display_name: "Cologne, Germany".to_string(),
            point: Some(LonLat::new(6.95, 50.94)),
            bounding_box: Some(BoundingBox { south: 50.0, north: 51.0, west: 6.5, east: 7.5 }),
            polygon: None,
        }
    }

    #[test]
    fn test_create_from_search_appends_one_area() {
        let mut registry = AreaRegistry::new();
        let area = registry.create_from_search(&bbox_candidate()).unwrap();
        assert_eq!(area.origin, AreaOrigin::Search);
        assert_eq!(area.name, "Area 1");
        assert!(area.visible);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_create_from_search_without_geometry_appends_nothing() {
        let mut registry = AreaRegistry::new();
        let candidate = SearchCandidate {
            display_name: "Nowhere".to_string(),
            point: None,
            bounding_box: None,
            polygon: None,
        };
        assert!(registry.create_from_search(&candidate).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_names_follow_count_not_history() {
        let mut registry = AreaRegistry::new();
        registry.create_from_drawing(Polygon::from_ring(drawn_ring()));
        registry.create_from_drawing(Polygon::from_ring(drawn_ring()));
        let second_id = registry.areas()[1].id.clone();

        registry.delete(&second_id);
        let replacement = registry.create_from_drawing(Polygon::from_ring(drawn_ring()));

        // Count realigned, so the label repeats. Accepted, cosmetic only.
        assert_eq!(replacement.name, "Area 2");
    }

    #[test]
    fn test_ids_unique_within_session() {
        let mut registry = AreaRegistry::new();
        for _ in 0..10 {
            registry.create_from_drawing(Polygon::from_ring(drawn_ring()));
        }
        let mut ids: Vec<_> = registry.areas().iter().map(|a| a.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn test_toggle_visibility_twice_restores() {
        let mut registry = AreaRegistry::new();
        let id = registry.create_from_drawing(Polygon::from_ring(drawn_ring())).id.clone();

        registry.toggle_visibility(&id);
        assert!(!registry.get(&id).unwrap().visible);
        registry.toggle_visibility(&id);
        assert!(registry.get(&id).unwrap().visible);
    }

    #[test]
    fn test_missing_ids_are_ignored() {
        let mut registry = AreaRegistry::new();
        registry.create_from_drawing(Polygon::from_ring(drawn_ring()));

        registry.toggle_visibility("area-0");
        registry.delete("area-0");

        assert_eq!(registry.len(), 1);
        assert!(registry.areas()[0].visible);
    }

    #[test]
    fn test_colors_come_from_palette() {
        let mut registry = AreaRegistry::new();
        for _ in 0..6 {
            registry.create_from_drawing(Polygon::from_ring(drawn_ring()));
        }
        for area in registry.areas() {
            assert!(AREA_COLORS.contains(&area.color.as_str()));
        }
    }
}
