use crate::geometry::{Point, Polygon};
use crate::placement::PlacementError;

/// Extra cells added to the bounding box extent on each axis.
pub const GRID_MARGIN: usize = 20;

/// Largest lattice the rasterizer allocates. The distance field keeps an
/// `f64` per cell on top of the occupancy, so this caps a request at a few
/// hundred megabytes.
pub const MAX_GRID_CELLS: usize = 1 << 24;

/// Row-major occupancy of a polygon sampled at integer offsets from its
/// bounding-box minimum. Cell `(row, col)` stands for the world point
/// `(col + offset_x, row + offset_y)`.
#[derive(Debug, Clone, PartialEq)]
pub struct OccupancyGrid {
    pub width: usize,
    pub height: usize,
    pub offset_x: f64,
    pub offset_y: f64,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.width + col]
    }

    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    pub fn interior_count(&self) -> usize {
        self.cells.iter().filter(|c| **c).count()
    }

    pub fn cell_to_world(&self, row: usize, col: usize) -> Point {
        Point::new(col as f64 + self.offset_x, row as f64 + self.offset_y)
    }

    /// Cell holding the world point, if it falls on the grid. Only exact for
    /// points on the integer sampling lattice; others round to the nearest
    /// sample.
    pub fn world_to_cell(&self, p: Point) -> Option<(usize, usize)> {
        let col = (p.x - self.offset_x).round();
        let row = (p.y - self.offset_y).round();
        if col < 0.0 || row < 0.0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        (row < self.height && col < self.width).then_some((row, col))
    }
}

/// Grid dimensions for a polygon: the ceiled bounding-box extent plus
/// [`GRID_MARGIN`], with the offset at the bounding-box minimum. Fails when
/// the lattice would exceed [`MAX_GRID_CELLS`].
pub fn grid_frame(polygon: &Polygon) -> Result<(usize, usize, f64, f64), PlacementError> {
    let bounds = polygon.bounds();
    let width = bounds.width().max(0.0).ceil() + GRID_MARGIN as f64;
    let height = bounds.height().max(0.0).ceil() + GRID_MARGIN as f64;
    let too_large = PlacementError::ExtentTooLarge { width, height };
    // both sides bounded first so the casts below cannot saturate
    let limit = MAX_GRID_CELLS as f64;
    if width > limit || height > limit {
        return Err(too_large);
    }
    let (width, height) = (width as usize, height as usize);
    check_cell_budget(width, height)?;
    Ok((width, height, bounds.min_x, bounds.min_y))
}

fn check_cell_budget(width: usize, height: usize) -> Result<usize, PlacementError> {
    width
        .checked_mul(height)
        .filter(|cells| *cells <= MAX_GRID_CELLS)
        .ok_or(PlacementError::ExtentTooLarge {
            width: width as f64,
            height: height as f64,
        })
}

/// Sample the polygon on a `width × height` lattice. A sample on the ring is
/// outside (see [`Polygon::contains`]), so row 0 and column 0 are always
/// empty when the offset is the bounding-box minimum.
pub fn rasterize(
    polygon: &Polygon,
    width: usize,
    height: usize,
    offset_x: f64,
    offset_y: f64,
) -> Result<OccupancyGrid, PlacementError> {
    let cell_count = check_cell_budget(width, height)?;
    let local = polygon.translated(-offset_x, -offset_y);
    let mut cells = vec![false; cell_count];
    for row in 0..height {
        for col in 0..width {
            cells[row * width + col] = local.contains(Point::new(col as f64, row as f64));
        }
    }
    Ok(OccupancyGrid {
        width,
        height,
        offset_x,
        offset_y,
        cells,
    })
}

pub fn rasterize_polygon(polygon: &Polygon) -> Result<OccupancyGrid, PlacementError> {
    let (width, height, offset_x, offset_y) = grid_frame(polygon)?;
    rasterize(polygon, width, height, offset_x, offset_y)
}
