//! Image loading and PNG export of stipples and density fields

use crate::io::configuration::STIPPLE_DOT_RADIUS;
use crate::io::error::{Result, StippleError};
use crate::spatial::{DensityField, Point};
use image::{DynamicImage, GrayImage, Luma};
use num_traits::ToPrimitive;
use std::path::Path;

const INK: Luma<u8> = Luma([0]);
const PAPER: u8 = 255;

/// Decode an image from disk
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    image::open(path).map_err(|e| StippleError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Rasterize points as filled dots on a white canvas
///
/// Dots falling partly outside the canvas are clipped.
pub fn render_stipple(points: &[Point], width: u32, height: u32, radius: f64) -> GrayImage {
    let mut img = GrayImage::from_pixel(width, height, Luma([PAPER]));
    let radius_sq = radius * radius;

    for point in points {
        let x_range = pixel_span(point.x, radius, width);
        let y_range = pixel_span(point.y, radius, height);
        let (Some((x0, x1)), Some((y0, y1))) = (x_range, y_range) else {
            continue;
        };

        for py in y0..=y1 {
            for px in x0..=x1 {
                let dx = f64::from(px) - point.x;
                let dy = f64::from(py) - point.y;
                if dx.mul_add(dx, dy * dy) <= radius_sq {
                    img.put_pixel(px, py, INK);
                }
            }
        }
    }

    img
}

// Inclusive pixel range covered by [centre - radius, centre + radius], clipped to the canvas
fn pixel_span(centre: f64, radius: f64, extent: u32) -> Option<(u32, u32)> {
    if extent == 0 {
        return None;
    }
    let low = (centre - radius).ceil().max(0.0);
    let high = (centre + radius).floor().min(f64::from(extent - 1));
    if low > high {
        return None;
    }
    Some((low.to_u32()?, high.to_u32()?))
}

/// Render a density field as grayscale, dense regions dark
pub fn render_density(field: &DensityField) -> GrayImage {
    let width = field.width() as u32;
    let height = field.height() as u32;
    GrayImage::from_fn(width, height, |x, y| {
        let density = field.value_at(x as usize, y as usize).unwrap_or(0.0);
        let shade = (1.0 - density.clamp(0.0, 1.0)) * f64::from(PAPER);
        Luma([shade.round().to_u8().unwrap_or(PAPER)])
    })
}

/// Export final stipple positions as a PNG
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn export_stipple_png(
    points: &[Point],
    width: u32,
    height: u32,
    output_path: &Path,
) -> Result<()> {
    save_gray(
        &render_stipple(points, width, height, STIPPLE_DOT_RADIUS),
        output_path,
    )
}

/// Export a density preview as a PNG
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn export_density_png(field: &DensityField, output_path: &Path) -> Result<()> {
    save_gray(&render_density(field), output_path)
}

/// Create the parent directory of `path` when it has one
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| StippleError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }
    Ok(())
}

fn save_gray(img: &GrayImage, output_path: &Path) -> Result<()> {
    ensure_parent_dir(output_path)?;
    img.save(output_path)
        .map_err(|e| StippleError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
