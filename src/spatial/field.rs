//! Read-only scalar density field sampled per pixel

use crate::io::error::{Result, StippleError, degenerate_input};
use ndarray::Array2;

/// Normalized per-pixel density, indexed `[row, col]`
///
/// Every value lies in `[0, 1]` and at least one value is positive. The field
/// is built once by the preprocessor and only read afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityField {
    values: Array2<f64>,
}

impl DensityField {
    /// Wrap an array of densities after validating its range
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The array has no rows or no columns
    /// - Any value is non-finite or outside `[0, 1]`
    /// - Every value is zero
    pub fn from_array(values: Array2<f64>) -> Result<Self> {
        let (rows, cols) = values.dim();
        if rows == 0 || cols == 0 {
            return Err(StippleError::InvalidSourceData {
                reason: format!("density field must be non-empty, got {cols}x{rows}"),
            });
        }

        if let Some(bad) = values
            .iter()
            .find(|v| !v.is_finite() || **v < 0.0 || **v > 1.0)
        {
            return Err(StippleError::InvalidSourceData {
                reason: format!("density value {bad} lies outside [0, 1]"),
            });
        }

        if !values.iter().any(|&v| v > 0.0) {
            return Err(degenerate_input(
                "density validation",
                &"every density value is zero",
            ));
        }

        Ok(Self { values })
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.values.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.values.nrows()
    }

    /// Density at pixel column `x`, row `y`
    pub fn value_at(&self, x: usize, y: usize) -> Option<f64> {
        self.values.get([y, x]).copied()
    }

    /// Underlying row-major array
    pub const fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Largest density value
    pub fn max_value(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }

    /// Sum of all density values
    pub fn total_weight(&self) -> f64 {
        self.values.sum()
    }
}
