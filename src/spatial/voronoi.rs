//! Voronoi diagram construction from the dual Delaunay triangulation

use crate::io::error::{Result, StippleError};
use crate::spatial::Point;
use spade::{DelaunayTriangulation, Triangulation};

/// Region of the plane owned by one generator
#[derive(Debug, Clone, PartialEq)]
pub enum VoronoiCell {
    /// Finite convex polygon, vertices ordered counter-clockwise around the generator
    Bounded(Vec<Point>),
    /// Region reaching infinity; holds only the finite vertices that are known
    Unbounded(Vec<Point>),
}

impl VoronoiCell {
    /// Polygon vertices when the cell is a closed polygon with at least three corners
    pub fn bounded_vertices(&self) -> Option<&[Point]> {
        match self {
            Self::Bounded(vertices) if vertices.len() >= 3 => Some(vertices),
            _ => None,
        }
    }

    /// Finite vertices regardless of boundedness
    pub fn vertices(&self) -> &[Point] {
        match self {
            Self::Bounded(vertices) | Self::Unbounded(vertices) => vertices,
        }
    }

    /// Whether the cell is a closed polygon
    pub const fn is_bounded(&self) -> bool {
        matches!(self, Self::Bounded(_))
    }
}

/// Generator points and their cells, index-aligned with the input point set
#[derive(Debug, Clone, PartialEq)]
pub struct VoronoiDiagram {
    generators: Vec<Point>,
    cells: Vec<VoronoiCell>,
}

impl VoronoiDiagram {
    /// Build the diagram of `points` inside a `width` x `height` pixel domain
    ///
    /// Coincident points share one cell. A point set with a single distinct
    /// position owns the whole domain rectangle.
    ///
    /// # Errors
    ///
    /// Returns an error if the triangulation rejects a point (non-finite or
    /// out-of-range coordinates). The reported iteration is 0; callers attach
    /// their own with [`WithIteration`](crate::io::error::WithIteration).
    pub fn build(points: &[Point], width: usize, height: usize) -> Result<Self> {
        let mut triangulation: DelaunayTriangulation<Point> = DelaunayTriangulation::new();
        let mut handles = Vec::with_capacity(points.len());
        for point in points {
            let handle =
                triangulation
                    .insert(*point)
                    .map_err(|e| StippleError::Triangulation {
                        iteration: 0,
                        reason: format!("cannot insert ({}, {}): {e:?}", point.x, point.y),
                    })?;
            handles.push(handle.index());
        }

        let mut distinct_cells = vec![VoronoiCell::Unbounded(Vec::new()); triangulation.num_vertices()];

        if triangulation.num_vertices() == 1 {
            if let Some(cell) = distinct_cells.first_mut() {
                *cell = VoronoiCell::Bounded(domain_rectangle(width, height));
            }
        } else {
            for vertex in triangulation.vertices() {
                let generator = vertex.position();
                let mut reaches_infinity = false;
                let mut corners = Vec::new();

                for edge in vertex.out_edges() {
                    match edge.face().as_inner() {
                        Some(face) => corners.push(face.circumcenter()),
                        None => reaches_infinity = true,
                    }
                }

                corners.sort_by(|a, b| {
                    let angle_a = (a.y - generator.y).atan2(a.x - generator.x);
                    let angle_b = (b.y - generator.y).atan2(b.x - generator.x);
                    angle_a.total_cmp(&angle_b)
                });

                let cell = if reaches_infinity || corners.len() < 3 {
                    VoronoiCell::Unbounded(corners)
                } else {
                    VoronoiCell::Bounded(corners)
                };

                if let Some(slot) = distinct_cells.get_mut(vertex.fix().index()) {
                    *slot = cell;
                }
            }
        }

        let cells = handles
            .iter()
            .map(|&index| {
                distinct_cells
                    .get(index)
                    .cloned()
                    .unwrap_or(VoronoiCell::Unbounded(Vec::new()))
            })
            .collect();

        Ok(Self {
            generators: points.to_vec(),
            cells,
        })
    }

    /// Generator points in input order
    pub fn generators(&self) -> &[Point] {
        &self.generators
    }

    /// Cells, one per generator
    pub fn cells(&self) -> &[VoronoiCell] {
        &self.cells
    }

    /// Cell owned by generator `index`
    pub fn cell(&self, index: usize) -> Option<&VoronoiCell> {
        self.cells.get(index)
    }

    /// Number of generators
    pub fn len(&self) -> usize {
        self.generators.len()
    }

    /// Whether the diagram has no generators
    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Number of generators whose cell is bounded
    pub fn bounded_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_bounded()).count()
    }
}

// Pixel centres sit on integer coordinates, so the domain extends half a pixel past them
fn domain_rectangle(width: usize, height: usize) -> Vec<Point> {
    let right = width as f64 - 0.5;
    let bottom = height as f64 - 0.5;
    vec![
        Point::new(-0.5, -0.5),
        Point::new(right, -0.5),
        Point::new(right, bottom),
        Point::new(-0.5, bottom),
    ]
}
