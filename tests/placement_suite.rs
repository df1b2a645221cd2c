use river_label::geometry::{Point, Polygon};
use river_label::raster::rasterize_polygon;
use river_label::{PlacementError, PlacementRequest, Strategy, compare_algorithms, place_label};

const SQUARE: [(f64, f64); 4] = [(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)];

const L_SHAPE: [(f64, f64); 6] = [
    (0.0, 0.0),
    (100.0, 0.0),
    (100.0, 20.0),
    (20.0, 20.0),
    (20.0, 100.0),
    (0.0, 100.0),
];

// Meandering ribbon: narrow channel that widens into a pool on the right.
const RIVER: [(f64, f64); 10] = [
    (0.0, 40.0),
    (60.0, 30.0),
    (110.0, 10.0),
    (170.0, 0.0),
    (170.0, 70.0),
    (120.0, 60.0),
    (70.0, 50.0),
    (40.0, 52.0),
    (10.0, 60.0),
    (0.0, 52.0),
];

#[test]
fn square_places_at_center() {
    let result = place_label(&SQUARE, "RIVER", 24).expect("square places");
    assert_eq!(result.optimal_x, 5.0);
    assert_eq!(result.optimal_y, 5.0);
    assert_eq!(result.max_width, 10.0);
    assert!((result.naive_x - 5.0).abs() < 1e-9);
    assert!((result.naive_y - 5.0).abs() < 1e-9);
}

#[test]
fn regular_convex_polygon_agrees_with_centroid() {
    let octagon: Vec<(f64, f64)> = (0..8)
        .map(|i| {
            let a = std::f64::consts::PI * 2.0 * i as f64 / 8.0 + 0.3;
            (50.0 + 40.0 * a.cos(), 50.0 + 40.0 * a.sin())
        })
        .collect();
    let result = place_label(&octagon, "RIVER", 12).expect("octagon places");
    assert!(
        result.improvement <= 3.0,
        "optimal and centroid differ by {}",
        result.improvement
    );
}

#[test]
fn bent_polygon_moves_label_inside() {
    let poly = Polygon::from_coords(&L_SHAPE);
    let result = compare_algorithms(&L_SHAPE, "RIVER", 24).expect("compares");

    assert!(!poly.contains(result.centroid.point()));
    assert!(poly.contains(result.distance_transform.point()));
    assert!(result.centroid.distance_to_boundary < result.distance_transform.distance_to_boundary);
    assert_ne!(result.winner, Strategy::Centroid);

    let placed = place_label(&L_SHAPE, "RIVER", 24).expect("places");
    assert!(placed.improvement > 10.0);
    assert!(!placed.fits_inside);
}

#[test]
fn placement_is_deterministic() {
    let a = place_label(&RIVER, "Danube", 18).expect("places");
    let b = place_label(&RIVER, "Danube", 18).expect("places");
    assert_eq!(a.optimal_x.to_bits(), b.optimal_x.to_bits());
    assert_eq!(a.optimal_y.to_bits(), b.optimal_y.to_bits());
    assert_eq!(a.max_width.to_bits(), b.max_width.to_bits());
    assert_eq!(a.improvement.to_bits(), b.improvement.to_bits());

    let c = compare_algorithms(&RIVER, "Danube", 18).expect("compares");
    let d = compare_algorithms(&RIVER, "Danube", 18).expect("compares");
    assert_eq!(c, d);
}

#[test]
fn two_points_are_rejected() {
    assert_eq!(
        place_label(&[(0.0, 0.0), (5.0, 5.0)], "RIVER", 24),
        Err(PlacementError::InsufficientVertices { found: 2 })
    );
    assert_eq!(
        compare_algorithms(&[(0.0, 0.0), (5.0, 5.0)], "RIVER", 24),
        Err(PlacementError::InsufficientVertices { found: 2 })
    );
}

#[test]
fn sliver_falls_back_to_centroid() {
    let sliver = [(0.0, 0.0), (40.0, 0.0), (40.0, 0.8), (0.0, 0.6)];
    let result = compare_algorithms(&sliver, "RIVER", 24).expect("compares");
    assert_eq!(result.distance_transform.distance_to_boundary, 0.0);
    assert_eq!(result.weighted.point(), Polygon::from_coords(&sliver).centroid());
    assert!(result.weighted.distance_to_boundary.is_finite());
}

#[test]
fn winner_has_largest_clearance() {
    // Wide pool with a thin tail running off to the right.
    let keyhole = [
        (0.0, 0.0),
        (60.0, 0.0),
        (60.0, 26.0),
        (160.0, 26.0),
        (160.0, 34.0),
        (60.0, 34.0),
        (60.0, 60.0),
        (0.0, 60.0),
    ];
    for coords in [&keyhole[..], &RIVER[..], &L_SHAPE[..]] {
        let result = compare_algorithms(coords, "RIVER", 24).expect("compares");
        let best = result
            .candidates()
            .iter()
            .map(|c| c.distance_to_boundary)
            .fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(result.winning_candidate().distance_to_boundary, best);
        // earliest strategy holding the maximum
        let first = result
            .candidates()
            .into_iter()
            .find(|c| c.distance_to_boundary == best)
            .map(|c| c.strategy);
        assert_eq!(Some(result.winner), first);
        assert_eq!(
            result.candidates().map(|c| c.strategy),
            [Strategy::Centroid, Strategy::MaxDistance, Strategy::Weighted]
        );
    }
}

#[test]
fn raster_offset_round_trip() {
    let poly = Polygon::from_coords(&RIVER).translated(-37.25, 512.5);
    let grid = rasterize_polygon(&poly).expect("rasterizes");
    let mut inside = 0;
    let mut outside = 0;
    for row in 0..grid.height {
        for col in 0..grid.width {
            let p = grid.cell_to_world(row, col);
            if poly.boundary_distance(p) < 1e-6 {
                continue;
            }
            assert_eq!(grid.world_to_cell(p), Some((row, col)));
            assert_eq!(grid.get(row, col), poly.contains(p), "cell ({row}, {col})");
            if poly.contains(p) {
                inside += 1;
            } else {
                outside += 1;
            }
        }
    }
    assert!(inside > 0 && outside > 0);

    let far = Point::new(poly.bounds().max_x + 500.0, poly.bounds().max_y);
    assert_eq!(grid.world_to_cell(far), None);
}

#[test]
fn request_flows_into_engine() {
    let req = PlacementRequest::from_json(
        r#"{"coordinates": [{"x": 0, "y": 0}, {"x": 0, "y": 10}, {"x": 10, "y": 10}, {"x": 10, "y": 0}], "label_text": "", "font_size": 500}"#,
    )
    .expect("parses")
    .normalize()
    .expect("normalizes");
    assert_eq!(req.label_text, "RIVER");
    assert_eq!(req.font_size, 24);
    let result = place_label(&req.coordinates, &req.label_text, req.font_size).expect("places");
    assert_eq!((result.optimal_x, result.optimal_y), (5.0, 5.0));
}

#[test]
fn oversized_request_is_an_error() {
    let req = PlacementRequest::from_json(r#"{"coordinates": [[0, 0], [1e12, 0], [0, 1e12]]}"#)
        .expect("parses")
        .normalize()
        .expect("normalizes");
    let err = place_label(&req.coordinates, &req.label_text, req.font_size).unwrap_err();
    assert!(matches!(err, PlacementError::ExtentTooLarge { .. }));
    assert!(matches!(
        compare_algorithms(&req.coordinates, &req.label_text, req.font_size),
        Err(PlacementError::ExtentTooLarge { .. })
    ));
    assert!(err.to_string().starts_with("Polygon extent too large"));
}
