//! Plane geometry for a single polygon ring: bounds, area centroid,
//! containment and clearance to the boundary.
//!
//! Containment is exclusive: a point lying on an edge or vertex (within
//! [`BOUNDARY_EPS`]) is outside. The rasterizer and every clearance value use
//! the same test, so raster cells and geometric scores never disagree about
//! the boundary.

use serde::{Deserialize, Serialize};

/// Tolerance for treating a point as lying on the ring.
pub const BOUNDARY_EPS: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Exterior ring of a simple polygon. The ring may or may not repeat its
/// first point; a closing duplicate only adds a zero-length edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn from_coords(coords: &[(f64, f64)]) -> Self {
        Self::new(coords.iter().copied().map(Point::from).collect())
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Edges of the closed ring, last point back to the first included.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    pub fn bounds(&self) -> Bounds {
        let mut bounds = Bounds {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        };
        for p in &self.points {
            bounds.min_x = bounds.min_x.min(p.x);
            bounds.min_y = bounds.min_y.min(p.y);
            bounds.max_x = bounds.max_x.max(p.x);
            bounds.max_y = bounds.max_y.max(p.y);
        }
        bounds
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(
            self.points
                .iter()
                .map(|p| Point::new(p.x + dx, p.y + dy))
                .collect(),
        )
    }

    pub fn signed_area(&self) -> f64 {
        if self.points.len() < 3 {
            return 0.0;
        }
        let sum: f64 = self.edges().map(|(a, b)| a.x * b.y - b.x * a.y).sum();
        sum / 2.0
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Area-weighted centroid. Zero-area rings fall back to the mean of the
    /// vertices.
    pub fn centroid(&self) -> Point {
        if self.points.is_empty() {
            return Point::default();
        }

        let mut cx = 0.0;
        let mut cy = 0.0;
        let mut twice_area = 0.0;
        for (a, b) in self.edges() {
            let cross = a.x * b.y - b.x * a.y;
            cx += (a.x + b.x) * cross;
            cy += (a.y + b.y) * cross;
            twice_area += cross;
        }

        if twice_area.abs() <= f64::EPSILON {
            let n = self.points.len() as f64;
            let (sx, sy) = self
                .points
                .iter()
                .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
            return Point::new(sx / n, sy / n);
        }

        let factor = 1.0 / (3.0 * twice_area);
        Point::new(cx * factor, cy * factor)
    }

    /// Even-odd containment with an exclusive boundary.
    pub fn contains(&self, p: Point) -> bool {
        if self.points.len() < 3 || self.is_on_boundary(p) {
            return false;
        }

        let mut inside = false;
        for (a, b) in self.edges() {
            if (a.y > p.y) != (b.y > p.y) {
                let x_cross = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
                if p.x < x_cross {
                    inside = !inside;
                }
            }
        }
        inside
    }

    pub fn is_on_boundary(&self, p: Point) -> bool {
        self.edges()
            .any(|(a, b)| point_segment_distance(p, a, b) <= BOUNDARY_EPS)
    }

    /// Unsigned distance from `p` to the nearest point of the ring.
    pub fn boundary_distance(&self, p: Point) -> f64 {
        self.edges()
            .map(|(a, b)| point_segment_distance(p, a, b))
            .fold(f64::INFINITY, f64::min)
    }

    /// Clearance of `p`: the boundary distance, negated when `p` is not
    /// strictly inside. A point on the ring scores plain `0.0`.
    pub fn signed_clearance(&self, p: Point) -> f64 {
        let d = self.boundary_distance(p);
        if d == 0.0 || self.contains(p) { d } else { -d }
    }
}

pub fn point_segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq <= f64::EPSILON {
        return p.distance(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance(Point::new(a.x + t * dx, a.y + t * dy))
}
