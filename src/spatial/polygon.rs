//! Convex cell polygon helpers: pixel bounds, vertex mean and strict containment

use crate::spatial::Point;
use geo::{Contains, Coord, LineString, Polygon};
use num_traits::ToPrimitive;

/// Inclusive rectangle of pixel indices covering a polygon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBounds {
    /// Smallest column index
    pub min_x: usize,
    /// Largest column index
    pub max_x: usize,
    /// Smallest row index
    pub min_y: usize,
    /// Largest row index
    pub max_y: usize,
}

impl PixelBounds {
    /// Bounding box of `vertices` truncated to pixel indices and clamped to a
    /// `width` x `height` field
    ///
    /// Returns `None` when there are no vertices or the box lies entirely
    /// outside the field.
    pub fn around(vertices: &[Point], width: usize, height: usize) -> Option<Self> {
        if vertices.is_empty() || width == 0 || height == 0 {
            return None;
        }

        let (mut lo_x, mut lo_y) = (f64::INFINITY, f64::INFINITY);
        let (mut hi_x, mut hi_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for vertex in vertices {
            lo_x = lo_x.min(vertex.x);
            lo_y = lo_y.min(vertex.y);
            hi_x = hi_x.max(vertex.x);
            hi_y = hi_y.max(vertex.y);
        }

        let min_x = lower_index(lo_x)?;
        let min_y = lower_index(lo_y)?;
        let max_x = upper_index(hi_x, width)?;
        let max_y = upper_index(hi_y, height)?;

        (min_x <= max_x && min_y <= max_y).then_some(Self {
            min_x,
            max_x,
            min_y,
            max_y,
        })
    }

    /// Half-open area `(max_x - min_x) * (max_y - min_y)` used to size random sampling
    pub const fn span_area(&self) -> usize {
        (self.max_x - self.min_x) * (self.max_y - self.min_y)
    }

    /// Number of pixels in the inclusive rectangle
    pub const fn pixel_count(&self) -> usize {
        (self.max_x - self.min_x + 1) * (self.max_y - self.min_y + 1)
    }
}

fn lower_index(value: f64) -> Option<usize> {
    value.trunc().max(0.0).to_usize()
}

fn upper_index(value: f64, dimension: usize) -> Option<usize> {
    let truncated = value.trunc();
    if truncated < 0.0 {
        return None;
    }
    let last = dimension - 1;
    Some(truncated.to_usize().map_or(last, |index| index.min(last)))
}

/// Unweighted mean of the polygon vertices
pub fn vertex_mean(vertices: &[Point]) -> Option<Point> {
    if vertices.is_empty() {
        return None;
    }
    let n = vertices.len() as f64;
    let (sum_x, sum_y) = vertices
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Some(Point::new(sum_x / n, sum_y / n))
}

/// Voronoi cell outline supporting strict interior tests
#[derive(Debug, Clone)]
pub struct CellPolygon {
    polygon: Polygon<f64>,
}

impl CellPolygon {
    /// Close the vertex ring into a polygon
    pub fn new(vertices: &[Point]) -> Self {
        let ring: Vec<Coord<f64>> = vertices.iter().map(|p| Coord { x: p.x, y: p.y }).collect();
        Self {
            polygon: Polygon::new(LineString::from(ring), vec![]),
        }
    }

    /// Whether `point` lies strictly inside the polygon (edges excluded)
    pub fn contains(&self, point: Point) -> bool {
        self.polygon.contains(&Coord {
            x: point.x,
            y: point.y,
        })
    }
}
