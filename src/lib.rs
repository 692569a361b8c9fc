//! Weighted Voronoi stippling of raster images
//!
//! An image is turned into a normalized density field, stipple points are
//! sampled in proportion to that density and then moved by Lloyd relaxation
//! toward the density-weighted centroids of their Voronoi cells.

#![forbid(unsafe_code)]

/// Initial sampling, centroid estimation and Lloyd relaxation
pub mod algorithm;
/// Image preprocessing and convergence statistics
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Gaussian smoothing and luminance
pub mod math;
/// Density fields, polygons and Voronoi diagrams
pub mod spatial;

pub use algorithm::stippler::{StippleConfig, StippleOutcome, Stippler, stipple, stipple_image};
pub use io::error::{Result, StippleError};
