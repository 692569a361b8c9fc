//! Conversion of a raw image into a normalized density field
//!
//! The stages run in a fixed order: Gaussian denoising, grayscale conversion,
//! inversion (dark becomes dense), normalization to a peak of exactly 1 and
//! optional quantization into evenly spaced bands.

use crate::io::configuration::{BLUR_SIGMA, BLUR_TRUNCATE};
use crate::io::error::{Result, computation_error, degenerate_input};
use crate::math::gaussian::gaussian_blur;
use crate::math::luminance;
use crate::spatial::DensityField;
use image::DynamicImage;
use ndarray::{Array2, Zip};

/// Build the density field for `image`
///
/// `quantization_levels == 0` leaves the field continuous.
///
/// # Errors
///
/// Returns an error if:
/// - The image has a zero dimension
/// - The inverted image is zero everywhere (a fully white source)
/// - Quantization collapses every value to zero
pub fn preprocess(image: &DynamicImage, quantization_levels: usize) -> Result<DensityField> {
    let gray = smoothed_grayscale(image)?;
    let normalized = normalize(&invert(&gray))?;

    let density = if quantization_levels > 0 {
        let banded = quantize(&normalized, quantization_levels);
        if !banded.iter().any(|&v| v > 0.0) {
            return Err(degenerate_input(
                "quantization",
                &format!("{quantization_levels} level(s) map every value to zero"),
            ));
        }
        banded
    } else {
        normalized
    };

    DensityField::from_array(density)
}

/// Blur each channel, then reduce to grayscale in `[0, 1]`
///
/// Transparent pixels are composited over white first.
///
/// # Errors
///
/// Returns an error if the image has a zero dimension.
pub fn smoothed_grayscale(image: &DynamicImage) -> Result<Array2<f64>> {
    let (width, height) = (image.width() as usize, image.height() as usize);
    if width == 0 || height == 0 {
        return Err(computation_error(
            "preprocess",
            &format!("image has no pixels ({width}x{height})"),
        ));
    }

    let planes: Vec<Array2<f64>> = channel_planes(image, width, height)?
        .iter()
        .map(|plane| gaussian_blur(plane, BLUR_SIGMA, BLUR_TRUNCATE))
        .collect();

    let gray = match planes.as_slice() {
        [r, g, b] => {
            let mut gray = Array2::zeros((height, width));
            Zip::from(&mut gray)
                .and(r)
                .and(g)
                .and(b)
                .for_each(|out, &red, &green, &blue| *out = luminance([red, green, blue]));
            gray
        }
        [l] => l.clone(),
        _ => {
            return Err(computation_error(
                "preprocess",
                &format!("unexpected channel count {}", planes.len()),
            ));
        }
    };

    Ok(gray.mapv(|v| v.clamp(0.0, 1.0)))
}

fn channel_planes(image: &DynamicImage, width: usize, height: usize) -> Result<Vec<Array2<f64>>> {
    let shape_error = |e: ndarray::ShapeError| computation_error("preprocess", &e);

    if image.color().has_color() {
        let rgba = image.to_rgba32f();
        let mut planes = vec![Vec::with_capacity(width * height); 3];
        for pixel in rgba.pixels() {
            let [r, g, b, a] = pixel.0.map(f64::from);
            for (plane, channel) in planes.iter_mut().zip([r, g, b]) {
                plane.push(over_white(channel, a));
            }
        }
        planes
            .into_iter()
            .map(|plane| Array2::from_shape_vec((height, width), plane).map_err(shape_error))
            .collect()
    } else {
        let luma = image.to_luma_alpha32f();
        let plane: Vec<f64> = luma
            .pixels()
            .map(|pixel| {
                let [l, a] = pixel.0.map(f64::from);
                over_white(l, a)
            })
            .collect();
        Ok(vec![
            Array2::from_shape_vec((height, width), plane).map_err(shape_error)?,
        ])
    }
}

fn over_white(value: f64, alpha: f64) -> f64 {
    let alpha = alpha.clamp(0.0, 1.0);
    value.clamp(0.0, 1.0).mul_add(alpha, 1.0 - alpha)
}

/// `1 - gray`, so dark source regions become dense
pub fn invert(gray: &Array2<f64>) -> Array2<f64> {
    gray.mapv(|v| 1.0 - v)
}

/// Divide by the maximum so the peak is exactly 1
///
/// # Errors
///
/// Returns an error if the maximum is not positive.
pub fn normalize(values: &Array2<f64>) -> Result<Array2<f64>> {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() || max <= 0.0 {
        return Err(degenerate_input(
            "normalization",
            &"inverted image is zero everywhere",
        ));
    }
    Ok(values.mapv(|v| (v / max).max(0.0)))
}

/// Bucket values in `[0, 1]` into `levels` evenly spaced bands
///
/// Each value maps to `floor(v * levels) / levels`, with the peak value 1
/// folded into the top band so exactly `levels` distinct outputs are possible.
pub fn quantize(values: &Array2<f64>, levels: usize) -> Array2<f64> {
    if levels == 0 {
        return values.clone();
    }
    let scale = levels as f64;
    let top = scale - 1.0;
    values.mapv(|v| (v * scale).floor().clamp(0.0, top) / scale)
}
