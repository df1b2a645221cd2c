//! Exact Euclidean distance transform of an occupancy grid.
//!
//! Two separable passes of the lower-envelope-of-parabolas transform over
//! squared distances (columns, then rows). Every interior cell ends up with
//! the distance to its nearest empty cell; empty cells hold 0. Cells outside
//! the array are never considered, so a grid without any empty cell maps to
//! `f64::INFINITY` everywhere. Grids from [`crate::raster::rasterize`] always
//! have an empty frame on row 0 and column 0.

use crate::geometry::Point;
use crate::raster::OccupancyGrid;

#[derive(Debug, Clone, PartialEq)]
pub struct DistanceField {
    pub width: usize,
    pub height: usize,
    pub offset_x: f64,
    pub offset_y: f64,
    values: Vec<f64>,
}

impl DistanceField {
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.width + col]
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn cell_to_world(&self, row: usize, col: usize) -> Point {
        Point::new(col as f64 + self.offset_x, row as f64 + self.offset_y)
    }

    /// First cell holding the global maximum in row-major order, as
    /// `(row, col, distance)`. `None` only for an empty grid.
    pub fn max_cell(&self) -> Option<(usize, usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for (idx, &value) in self.values.iter().enumerate() {
            if best.is_none_or(|(_, b)| value > b) {
                best = Some((idx, value));
            }
        }
        best.map(|(idx, value)| (idx / self.width, idx % self.width, value))
    }

    pub fn max_distance(&self) -> f64 {
        self.max_cell().map_or(0.0, |(_, _, d)| d)
    }

    /// Strictly positive distances in row-major order.
    pub fn positive_values(&self) -> Vec<f64> {
        self.values.iter().copied().filter(|v| *v > 0.0).collect()
    }

    /// `(row, col)` of every cell whose distance exceeds `threshold`.
    pub fn cells_above(&self, threshold: f64) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.values
            .iter()
            .enumerate()
            .filter(move |(_, v)| **v > threshold)
            .map(move |(idx, _)| (idx / width, idx % width))
    }
}

pub fn build_distance_field(grid: &OccupancyGrid) -> DistanceField {
    let (width, height) = (grid.width, grid.height);
    let mut sq: Vec<f64> = grid
        .cells()
        .iter()
        .map(|inside| if *inside { f64::INFINITY } else { 0.0 })
        .collect();

    let mut envelope = Envelope::with_capacity(width.max(height));
    let mut line = vec![0.0; height];
    let mut out = vec![0.0; height];
    for col in 0..width {
        for row in 0..height {
            line[row] = sq[row * width + col];
        }
        envelope.transform(&line, &mut out);
        for row in 0..height {
            sq[row * width + col] = out[row];
        }
    }

    let mut out = vec![0.0; width];
    for row in 0..height {
        let span = row * width..(row + 1) * width;
        envelope.transform(&sq[span.clone()], &mut out);
        sq[span].copy_from_slice(&out);
    }

    DistanceField {
        width,
        height,
        offset_x: grid.offset_x,
        offset_y: grid.offset_y,
        values: sq.into_iter().map(f64::sqrt).collect(),
    }
}

/// Scratch space for the 1D squared transform, reused across lines.
struct Envelope {
    // parabola vertices and the left boundary of each parabola's reign
    vertices: Vec<usize>,
    bounds: Vec<f64>,
}

impl Envelope {
    fn with_capacity(n: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(n),
            bounds: Vec::with_capacity(n),
        }
    }

    fn transform(&mut self, f: &[f64], out: &mut [f64]) {
        self.vertices.clear();
        self.bounds.clear();

        for q in 0..f.len() {
            if !f[q].is_finite() {
                continue;
            }
            let mut left = f64::NEG_INFINITY;
            while let (Some(&p), Some(&start)) = (self.vertices.last(), self.bounds.last()) {
                let s = intersection(f, p, q);
                if s <= start {
                    self.vertices.pop();
                    self.bounds.pop();
                } else {
                    left = s;
                    break;
                }
            }
            self.vertices.push(q);
            self.bounds.push(left);
        }

        if self.vertices.is_empty() {
            out.fill(f64::INFINITY);
            return;
        }

        let mut k = 0;
        for (q, slot) in out.iter_mut().enumerate() {
            while k + 1 < self.vertices.len() && self.bounds[k + 1] < q as f64 {
                k += 1;
            }
            let p = self.vertices[k];
            let d = q as f64 - p as f64;
            *slot = d * d + f[p];
        }
    }
}

fn intersection(f: &[f64], p: usize, q: usize) -> f64 {
    let (pf, qf) = (p as f64, q as f64);
    ((f[q] + qf * qf) - (f[p] + pf * pf)) / (2.0 * (qf - pf))
}
