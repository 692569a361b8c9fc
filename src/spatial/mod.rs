//! Spatial data structures for the density field and Voronoi geometry
//!
//! This module contains:
//! - The read-only density field
//! - Cell polygon helpers (bounds, containment, vertex mean)
//! - Voronoi diagram construction

/// Normalized density field
pub mod field;
/// Convex polygon helpers for Voronoi cells
pub mod polygon;
/// Voronoi diagram construction from a point set
pub mod voronoi;

pub use field::DensityField;
pub use voronoi::{VoronoiCell, VoronoiDiagram};

/// Planar point in pixel units, `x` is the column and `y` the row
pub type Point = spade::Point2<f64>;
