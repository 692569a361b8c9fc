//! Sampling policies: density-weighted seeding and centroid candidate generation

use crate::io::configuration::RANDOM_SAMPLES_PER_PIXEL;
use crate::io::error::{Result, StippleError, degenerate_input, invalid_parameter};
use crate::spatial::polygon::PixelBounds;
use crate::spatial::{DensityField, Point};
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use std::fmt;
use std::str::FromStr;

/// How candidate locations inside a cell are chosen for centroid estimation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SamplingMode {
    /// Uniform random points over the cell's bounding box
    ///
    /// Cheaper on large cells, and the jitter helps points escape local minima.
    #[default]
    Random,
    /// Every integer pixel inside the cell's bounding box
    Exhaustive,
}

impl SamplingMode {
    /// Candidate locations covering `bounds`, generated on demand
    ///
    /// Random mode draws `RANDOM_SAMPLES_PER_PIXEL` points per unit of the
    /// half-open box area from `[min, max)`; a box with zero span yields no
    /// candidates. Exhaustive mode enumerates the inclusive pixel grid row by
    /// row and never touches `rng`.
    pub fn candidates<R: Rng + ?Sized>(
        self,
        bounds: PixelBounds,
        rng: &mut R,
    ) -> Candidates<'_, R> {
        let total = match self {
            Self::Random => bounds.span_area() * RANDOM_SAMPLES_PER_PIXEL,
            Self::Exhaustive => bounds.pixel_count(),
        };
        Candidates {
            mode: self,
            bounds,
            emitted: 0,
            total,
            rng,
        }
    }

    /// Lowercase mode name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Exhaustive => "exhaustive",
        }
    }
}

impl fmt::Display for SamplingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SamplingMode {
    type Err = StippleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(Self::Random),
            "exhaustive" => Ok(Self::Exhaustive),
            _ => Err(invalid_parameter(
                "sampling_mode",
                &s,
                &"expected 'random' or 'exhaustive'",
            )),
        }
    }
}

/// Lazy stream of centroid candidates for one cell
///
/// Created by [`SamplingMode::candidates`]. Nothing is buffered, so large
/// cells cost time but no memory.
pub struct Candidates<'r, R: ?Sized> {
    mode: SamplingMode,
    bounds: PixelBounds,
    emitted: usize,
    total: usize,
    rng: &'r mut R,
}

impl<R: Rng + ?Sized> Iterator for Candidates<'_, R> {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.emitted >= self.total {
            return None;
        }
        let index = self.emitted;
        self.emitted += 1;

        let b = self.bounds;
        let point = match self.mode {
            SamplingMode::Random => {
                let x = self.rng.random_range(b.min_x as f64..b.max_x as f64);
                let y = self.rng.random_range(b.min_y as f64..b.max_y as f64);
                Point::new(x, y)
            }
            SamplingMode::Exhaustive => {
                let columns = b.max_x - b.min_x + 1;
                Point::new(
                    (b.min_x + index % columns) as f64,
                    (b.min_y + index / columns) as f64,
                )
            }
        };
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total - self.emitted;
        (remaining, Some(remaining))
    }
}

impl<R: Rng + ?Sized> ExactSizeIterator for Candidates<'_, R> {}

/// Draw `count` pixel positions with replacement, weighted by `density^weight_scale`
///
/// The field is flattened row by row; a drawn index `i` becomes the point
/// `(i mod width, i div width)`. Dense (dark) regions therefore receive most
/// of the initial points.
///
/// # Errors
///
/// Returns an error if:
/// - `count` is zero
/// - `weight_scale` is not a positive finite number
/// - The scaled weights sum to zero
pub fn sample_initial_points<R: Rng + ?Sized>(
    field: &DensityField,
    count: usize,
    weight_scale: f64,
    rng: &mut R,
) -> Result<Vec<Point>> {
    if count == 0 {
        return Err(invalid_parameter(
            "point_count",
            &count,
            &"at least one stipple point is required",
        ));
    }
    if !weight_scale.is_finite() || weight_scale <= 0.0 {
        return Err(invalid_parameter(
            "weight_scale",
            &weight_scale,
            &"must be a positive finite exponent",
        ));
    }

    let width = field.width();
    let weights: Vec<f64> = field
        .values()
        .iter()
        .map(|v| v.powf(weight_scale))
        .collect();
    let distribution =
        WeightedIndex::new(&weights).map_err(|e| degenerate_input("initial sampling", &e))?;

    Ok((0..count)
        .map(|_| {
            let index = distribution.sample(rng);
            Point::new((index % width) as f64, (index / width) as f64)
        })
        .collect())
}
