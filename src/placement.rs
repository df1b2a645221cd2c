//! Placement entry points: the single-point placement with its fit check and
//! the three-way strategy comparison.

use serde::Serialize;
use thiserror::Error;

use crate::config::PlacementConfig;
use crate::distance_field::{DistanceField, build_distance_field};
use crate::geometry::Polygon;
use crate::raster::{MAX_GRID_CELLS, rasterize_polygon};
use crate::strategy::{
    Candidate, Strategy, centroid_candidate, max_distance_candidate, weighted_candidate,
};
use crate::text_metrics::{TextFootprint, estimate_footprint};

pub const MIN_VERTICES: usize = 3;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlacementError {
    #[error("Need at least 3 points, got {found}")]
    InsufficientVertices { found: usize },
    /// Grid dimensions (extent plus margin) that would not fit the raster budget.
    #[error("Polygon extent too large: a {width} x {height} grid exceeds {max} cells", max = MAX_GRID_CELLS)]
    ExtentTooLarge { width: f64, height: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementResult {
    pub optimal_x: f64,
    pub optimal_y: f64,
    pub naive_x: f64,
    pub naive_y: f64,
    pub fits_inside: bool,
    /// Diameter of the largest clear disc: twice the peak distance.
    pub max_width: f64,
    /// Distance between the optimal and the naive point.
    pub improvement: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub centroid: Candidate,
    pub distance_transform: Candidate,
    pub weighted: Candidate,
    pub winner: Strategy,
}

impl ComparisonResult {
    /// Candidates in tie-break priority order.
    pub fn candidates(&self) -> [&Candidate; 3] {
        [&self.centroid, &self.distance_transform, &self.weighted]
    }

    pub fn candidate(&self, strategy: Strategy) -> &Candidate {
        match strategy {
            Strategy::Centroid => &self.centroid,
            Strategy::MaxDistance => &self.distance_transform,
            Strategy::Weighted => &self.weighted,
        }
    }

    pub fn winning_candidate(&self) -> &Candidate {
        self.candidate(self.winner)
    }
}

/// Stateless placement engine parameterized by its padding.
#[derive(Debug, Clone, Copy, Default)]
pub struct Labeler {
    pub config: PlacementConfig,
}

impl Labeler {
    pub fn new(config: PlacementConfig) -> Self {
        Self { config }
    }

    pub fn place_label(
        &self,
        coordinates: &[(f64, f64)],
        label_text: &str,
        font_size: u32,
    ) -> Result<PlacementResult, PlacementError> {
        let polygon = polygon_from(coordinates)?;
        let footprint = estimate_footprint(label_text, font_size);
        let field = field_for(&polygon)?;

        let optimal = max_distance_candidate(&field);
        let naive = polygon.centroid();
        let max_distance = optimal.distance_to_boundary;

        Ok(PlacementResult {
            optimal_x: optimal.x,
            optimal_y: optimal.y,
            naive_x: naive.x,
            naive_y: naive.y,
            fits_inside: self.fits(max_distance, footprint),
            max_width: max_distance * 2.0,
            improvement: optimal.point().distance(naive),
        })
    }

    /// Runs all three strategies on one shared raster. The label only sizes
    /// the figure downstream; candidates do not depend on it.
    pub fn compare_algorithms(
        &self,
        coordinates: &[(f64, f64)],
        _label_text: &str,
        _font_size: u32,
    ) -> Result<ComparisonResult, PlacementError> {
        let polygon = polygon_from(coordinates)?;
        let field = field_for(&polygon)?;

        let centroid = centroid_candidate(&polygon);
        let distance_transform = max_distance_candidate(&field);
        let weighted = weighted_candidate(&polygon, &field);
        let winner = select_winner([&centroid, &distance_transform, &weighted]);

        Ok(ComparisonResult {
            centroid,
            distance_transform,
            weighted,
            winner,
        })
    }

    pub fn fits(&self, max_distance: f64, footprint: TextFootprint) -> bool {
        max_distance * 2.0 >= footprint.extent() + self.config.padding
    }
}

/// Highest clearance wins; ties go to the earliest candidate in
/// [`Strategy::ALL`] order.
pub fn select_winner(candidates: [&Candidate; 3]) -> Strategy {
    let mut best = candidates[0];
    for candidate in &candidates[1..] {
        if candidate.distance_to_boundary > best.distance_to_boundary {
            best = candidate;
        }
    }
    best.strategy
}

pub fn place_label(
    coordinates: &[(f64, f64)],
    label_text: &str,
    font_size: u32,
) -> Result<PlacementResult, PlacementError> {
    Labeler::default().place_label(coordinates, label_text, font_size)
}

pub fn compare_algorithms(
    coordinates: &[(f64, f64)],
    label_text: &str,
    font_size: u32,
) -> Result<ComparisonResult, PlacementError> {
    Labeler::default().compare_algorithms(coordinates, label_text, font_size)
}

fn polygon_from(coordinates: &[(f64, f64)]) -> Result<Polygon, PlacementError> {
    if coordinates.len() < MIN_VERTICES {
        return Err(PlacementError::InsufficientVertices {
            found: coordinates.len(),
        });
    }
    Ok(Polygon::from_coords(coordinates))
}

fn field_for(polygon: &Polygon) -> Result<DistanceField, PlacementError> {
    Ok(build_distance_field(&rasterize_polygon(polygon)?))
}
