/// Density-weighted centroid estimation for a single cell
pub mod centroid;
/// Fixed-iteration Lloyd relaxation engine
pub mod relaxation;
/// Initial point sampling and centroid candidate policies
pub mod sampling;
/// Run orchestration and configuration
pub mod stippler;
