//! Separable Gaussian smoothing with nearest-edge extension

use ndarray::{Array2, Axis};

/// Normalized 1D Gaussian kernel
///
/// The kernel radius is `truncate * sigma` rounded to the nearest pixel, so
/// `sigma = 1` with the default truncation gives nine taps. A non-positive or
/// non-finite sigma yields the identity kernel.
pub fn gaussian_kernel(sigma: f64, truncate: f64) -> Vec<f64> {
    if !sigma.is_finite() || sigma <= 0.0 || !truncate.is_finite() || truncate < 0.0 {
        return vec![1.0];
    }

    let radius = truncate.mul_add(sigma, 0.5) as usize;
    let centre = radius as f64;
    let weights: Vec<f64> = (0..=2 * radius)
        .map(|i| {
            let x = (i as f64 - centre) / sigma;
            (-0.5 * x * x).exp()
        })
        .collect();

    let total: f64 = weights.iter().sum();
    weights.into_iter().map(|w| w / total).collect()
}

/// Blur a 2D plane, first along rows then along columns
///
/// Samples beyond the border repeat the nearest edge value, so a constant
/// plane stays constant.
pub fn gaussian_blur(plane: &Array2<f64>, sigma: f64, truncate: f64) -> Array2<f64> {
    let kernel = gaussian_kernel(sigma, truncate);
    if kernel.len() == 1 {
        return plane.clone();
    }
    let horizontal = convolve_lanes(plane, &kernel, Axis(1));
    convolve_lanes(&horizontal, &kernel, Axis(0))
}

fn convolve_lanes(plane: &Array2<f64>, kernel: &[f64], axis: Axis) -> Array2<f64> {
    let radius = kernel.len() / 2;
    let mut output = Array2::zeros(plane.raw_dim());

    for (source, mut target) in plane.lanes(axis).into_iter().zip(output.lanes_mut(axis)) {
        let last = source.len().saturating_sub(1);
        for (i, slot) in target.iter_mut().enumerate() {
            *slot = kernel
                .iter()
                .enumerate()
                .map(|(k, &weight)| {
                    let j = (i + k).saturating_sub(radius).min(last);
                    weight * source.get(j).copied().unwrap_or(0.0)
                })
                .sum();
        }
    }

    output
}
