//! Density-weighted centroid of a single Voronoi cell

use crate::algorithm::sampling::SamplingMode;
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::polygon::{CellPolygon, PixelBounds, vertex_mean};
use crate::spatial::{DensityField, Point};
use num_traits::ToPrimitive;
use rand::Rng;

/// Weighted centroid of the convex polygon `vertices` under `field`
///
/// Candidates are generated over the polygon's bounding box (clamped to the
/// field), filtered to those strictly inside the polygon and snapped to the
/// nearest pixel, ties to even. The result is the density-weighted mean of
/// the snapped positions.
///
/// Falls back to the unweighted vertex mean when the polygon has fewer than
/// three vertices, when no candidate lands inside it, or when the candidates
/// inside carry zero total density. These are expected for thin slivers and
/// are not errors.
///
/// # Errors
///
/// Returns an error if `vertices` is empty.
pub fn density_centroid<R: Rng + ?Sized>(
    vertices: &[Point],
    field: &DensityField,
    mode: SamplingMode,
    rng: &mut R,
) -> Result<Point> {
    let fallback = vertex_mean(vertices)
        .ok_or_else(|| invalid_parameter("cell_polygon", &0, &"polygon has no vertices"))?;
    if vertices.len() < 3 {
        return Ok(fallback);
    }

    let Some(bounds) = PixelBounds::around(vertices, field.width(), field.height()) else {
        return Ok(fallback);
    };

    let polygon = CellPolygon::new(vertices);
    let mut weight_sum = 0.0;
    let mut weighted_x = 0.0;
    let mut weighted_y = 0.0;

    for candidate in mode.candidates(bounds, rng) {
        if !polygon.contains(candidate) {
            continue;
        }

        let px = candidate.x.round_ties_even();
        let py = candidate.y.round_ties_even();
        let weight = match (px.to_usize(), py.to_usize()) {
            (Some(x), Some(y)) => field.value_at(x, y).unwrap_or(0.0),
            _ => 0.0,
        };

        weight_sum += weight;
        weighted_x += px * weight;
        weighted_y += py * weight;
    }

    if weight_sum <= 0.0 {
        return Ok(fallback);
    }

    Ok(Point::new(weighted_x / weight_sum, weighted_y / weight_sum))
}
