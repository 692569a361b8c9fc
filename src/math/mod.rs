//! Mathematical utilities for preprocessing

use crate::io::configuration::LUMINANCE_WEIGHTS;

/// Separable Gaussian blur
pub mod gaussian;

/// Perceptual luminance of linear RGB values in `[0, 1]`
pub fn luminance(rgb: [f64; 3]) -> f64 {
    let [r, g, b] = rgb;
    let [wr, wg, wb] = LUMINANCE_WEIGHTS;
    wb.mul_add(b, wr.mul_add(r, wg * g))
}
