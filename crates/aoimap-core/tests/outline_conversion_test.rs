//! Property tests for candidate-to-polygon conversion.
//!
//! The corner order of the bounding-box rectangle and the exact 0.01 degree
//! point-fallback offset are load-bearing; these tests pin both down across
//! the whole input space.

use proptest::prelude::*;

use aoimap_core::geo::convert::{outline_polygon, POINT_FALLBACK_OFFSET_DEG};
use aoimap_core::models::{BoundingBox, LonLat, SearchCandidate};

fn candidate(
    point: Option<LonLat>,
    bounding_box: Option<BoundingBox>,
) -> SearchCandidate {
    SearchCandidate {
        display_name: "generated".to_string(),
        point,
        bounding_box,
        polygon: None,
    }
}

proptest! {
    #[test]
    fn bounding_box_yields_exact_corner_order(
        south in -85.0f64..84.0,
        height in 0.001f64..1.0,
        west in -179.0f64..178.0,
        width in 0.001f64..1.0,
    ) {
        let north = south + height;
        let east = west + width;
        let input = candidate(
            Some(LonLat::new(west, south)),
            Some(BoundingBox { south, north, west, east }),
        );

        let polygon = outline_polygon(&input).unwrap();
        let ring = polygon.outer().unwrap();

        prop_assert_eq!(ring.len(), 5);
        prop_assert!(ring.is_closed());
        prop_assert_eq!(
            ring.points(),
            &[
                LonLat::new(west, south),
                LonLat::new(east, south),
                LonLat::new(east, north),
                LonLat::new(west, north),
                LonLat::new(west, south),
            ]
        );
    }

    #[test]
    fn point_fallback_is_a_closed_square_at_fixed_offset(
        lon in -179.0f64..179.0,
        lat in -85.0f64..85.0,
    ) {
        let input = candidate(Some(LonLat::new(lon, lat)), None);

        let polygon = outline_polygon(&input).unwrap();
        let ring = polygon.outer().unwrap();

        prop_assert_eq!(ring.len(), 5);
        prop_assert!(ring.is_closed());

        // Four distinct corners, each exactly the fixed offset away on both
        // axes. No latitude correction is applied anywhere on the globe.
        let corners = &ring.points()[..4];
        for corner in corners {
            prop_assert!(((corner.lon() - lon).abs() - POINT_FALLBACK_OFFSET_DEG).abs() < 1e-9);
            prop_assert!(((corner.lat() - lat).abs() - POINT_FALLBACK_OFFSET_DEG).abs() < 1e-9);
        }
        for (i, a) in corners.iter().enumerate() {
            for b in &corners[i + 1..] {
                prop_assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn polygon_branch_wins_over_bounding_box(
        south in -10.0f64..0.0,
        west in -10.0f64..0.0,
    ) {
        use aoimap_core::models::Ring;

        let ring = Ring::closed(vec![
            LonLat::new(west, south),
            LonLat::new(west + 1.0, south),
            LonLat::new(west, south + 1.0),
        ]);
        let mut input = candidate(
            Some(LonLat::new(west, south)),
            Some(BoundingBox { south, north: south + 2.0, west, east: west + 2.0 }),
        );
        input.polygon = Some(ring.clone());

        let polygon = outline_polygon(&input).unwrap();
        prop_assert_eq!(polygon.outer(), Some(&ring));
    }
}

#[test]
fn candidate_without_any_geometry_is_rejected() {
    let input = candidate(None, None);
    assert!(outline_polygon(&input).is_err());
}
