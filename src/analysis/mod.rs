//! Analysis modules for density preparation and run statistics

/// Displacement statistics across relaxation iterations
pub mod convergence;
/// Raw image to density field conversion
pub mod preprocess;
