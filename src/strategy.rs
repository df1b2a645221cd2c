//! Placement strategies. Each turns the polygon and its distance field into a
//! single scored candidate point.

use serde::{Deserialize, Serialize};

use crate::distance_field::DistanceField;
use crate::geometry::{Point, Polygon};

/// Percentile of the positive distances a cell must exceed to count as safe
/// interior for [`Strategy::Weighted`].
pub const WEIGHTED_PERCENTILE: f64 = 50.0;

/// Strategies in tie-break priority order: when scores are equal the earlier
/// variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Centroid,
    #[serde(rename = "distance_transform")]
    MaxDistance,
    Weighted,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Centroid, Strategy::MaxDistance, Strategy::Weighted];

    pub fn key(self) -> &'static str {
        match self {
            Strategy::Centroid => "centroid",
            Strategy::MaxDistance => "distance_transform",
            Strategy::Weighted => "weighted",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Strategy::Centroid => "Centroid (Naive)",
            Strategy::MaxDistance => "Distance Transform (Ours)",
            Strategy::Weighted => "Weighted Centroid",
        }
    }

    pub fn method(self) -> &'static str {
        match self {
            Strategy::Centroid => "Geometric center only",
            Strategy::MaxDistance => "Maximum distance from all edges",
            Strategy::Weighted => "Average of safe interior points",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    #[serde(skip_serializing)]
    pub strategy: Strategy,
    pub name: String,
    pub x: f64,
    pub y: f64,
    #[serde(rename = "distance_to_edge")]
    pub distance_to_boundary: f64,
    pub method: String,
}

impl Candidate {
    fn new(strategy: Strategy, point: Point, distance_to_boundary: f64) -> Self {
        Self {
            strategy,
            name: strategy.display_name().to_string(),
            x: point.x,
            y: point.y,
            distance_to_boundary,
            method: strategy.method().to_string(),
        }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Area centroid scored by its signed clearance; negative when the centroid
/// falls outside a bent polygon.
pub fn centroid_candidate(polygon: &Polygon) -> Candidate {
    let c = polygon.centroid();
    Candidate::new(Strategy::Centroid, c, polygon.signed_clearance(c))
}

/// The first cell at the field's maximum. A field with no interior reports
/// distance 0 at the grid origin.
pub fn max_distance_candidate(field: &DistanceField) -> Candidate {
    let (point, distance) = match field.max_cell() {
        Some((row, col, d)) => (field.cell_to_world(row, col), d),
        None => (Point::new(field.offset_x, field.offset_y), 0.0),
    };
    Candidate::new(Strategy::MaxDistance, point, distance)
}

/// Mean position of the cells deeper than the median positive distance.
/// Falls back to the polygon centroid when the raster has no interior or no
/// cell clears the threshold. Scored geometrically, not from the raster.
pub fn weighted_candidate(polygon: &Polygon, field: &DistanceField) -> Candidate {
    let point = weighted_point(field).unwrap_or_else(|| polygon.centroid());
    Candidate::new(Strategy::Weighted, point, polygon.signed_clearance(point))
}

fn weighted_point(field: &DistanceField) -> Option<Point> {
    let mut interior = field.positive_values();
    if interior.is_empty() {
        return None;
    }
    interior.sort_by(f64::total_cmp);
    let threshold = percentile(&interior, WEIGHTED_PERCENTILE);

    let (mut sum_row, mut sum_col, mut count) = (0.0, 0.0, 0usize);
    for (row, col) in field.cells_above(threshold) {
        sum_row += row as f64;
        sum_col += col as f64;
        count += 1;
    }
    if count == 0 {
        return None;
    }
    let n = count as f64;
    Some(Point::new(
        sum_col / n + field.offset_x,
        sum_row / n + field.offset_y,
    ))
}

/// Percentile of sorted values, interpolating linearly between the two
/// closest ranks.
pub fn percentile(sorted: &[f64], pct: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let rank = (pct / 100.0).clamp(0.0, 1.0) * (n - 1) as f64;
            let lo = rank.floor() as usize;
            let hi = rank.ceil() as usize;
            let frac = rank - lo as f64;
            sorted[lo] + (sorted[hi] - sorted[lo]) * frac
        }
    }
}
