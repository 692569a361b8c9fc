//! Stippling orchestration: validation, seeded sampling, relaxation and history

use crate::algorithm::relaxation::LloydRelaxation;
use crate::algorithm::sampling::{SamplingMode, sample_initial_points};
use crate::analysis::convergence::ConvergenceReport;
use crate::analysis::preprocess::preprocess;
use crate::io::configuration::{
    DEFAULT_ITERATIONS, DEFAULT_POINT_COUNT, DEFAULT_QUANTIZATION_LEVELS, DEFAULT_SEED,
    DEFAULT_WEIGHT_SCALE,
};
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::{DensityField, Point, VoronoiDiagram};
use image::DynamicImage;
use rand::{SeedableRng, rngs::StdRng};

/// Parameters of a stippling run
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StippleConfig {
    /// Number of stipple points, fixed for the whole run
    pub point_count: usize,
    /// Lloyd iterations to run
    pub iterations: usize,
    /// Density quantization levels (0 disables quantization)
    pub quantization_levels: usize,
    /// Candidate generation for centroid estimation
    pub sampling_mode: SamplingMode,
    /// Seed for every random draw in the run
    pub seed: u64,
    /// Exponent applied to density before initial sampling
    pub weight_scale: f64,
}

impl Default for StippleConfig {
    fn default() -> Self {
        Self {
            point_count: DEFAULT_POINT_COUNT,
            iterations: DEFAULT_ITERATIONS,
            quantization_levels: DEFAULT_QUANTIZATION_LEVELS,
            sampling_mode: SamplingMode::default(),
            seed: DEFAULT_SEED,
            weight_scale: DEFAULT_WEIGHT_SCALE,
        }
    }
}

impl StippleConfig {
    /// Check the configuration before any computation
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `point_count` is zero
    /// - `weight_scale` is not a positive finite number
    pub fn validate(&self) -> Result<()> {
        if self.point_count == 0 {
            return Err(invalid_parameter(
                "point_count",
                &self.point_count,
                &"at least one stipple point is required",
            ));
        }
        if !self.weight_scale.is_finite() || self.weight_scale <= 0.0 {
            return Err(invalid_parameter(
                "weight_scale",
                &self.weight_scale,
                &"must be a positive finite exponent",
            ));
        }
        Ok(())
    }
}

/// Result of a completed run
#[derive(Debug, Clone, PartialEq)]
pub struct StippleOutcome {
    /// Voronoi diagram of the final points
    pub diagram: VoronoiDiagram,
    /// Point sets from the initial sample through every iteration
    pub history: Vec<Vec<Point>>,
}

impl StippleOutcome {
    /// Final stipple positions
    pub fn final_points(&self) -> &[Point] {
        self.diagram.generators()
    }

    /// Displacement statistics for every iteration
    pub fn convergence(&self) -> ConvergenceReport {
        ConvergenceReport::from_history(&self.history)
    }
}

/// Drives one stippling run step by step
///
/// The history is owned here and nowhere else; the relaxation engine only
/// hands back each new point set.
pub struct Stippler<'a> {
    config: StippleConfig,
    relaxation: LloydRelaxation<'a>,
    history: Vec<Vec<Point>>,
    rng: StdRng,
}

impl<'a> Stippler<'a> {
    /// Validate, draw the initial sample and prepare relaxation
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration is invalid
    /// - The field has no weight to sample from
    /// - The initial diagram cannot be built
    pub fn new(field: &'a DensityField, config: StippleConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = StdRng::seed_from_u64(config.seed);
        let initial =
            sample_initial_points(field, config.point_count, config.weight_scale, &mut rng)?;

        let mut history = Vec::with_capacity(config.iterations.saturating_add(1));
        history.push(initial.clone());

        let relaxation =
            LloydRelaxation::new(field, initial, config.iterations, config.sampling_mode)?;

        Ok(Self {
            config,
            relaxation,
            history,
            rng,
        })
    }

    /// Advance one Lloyd iteration
    ///
    /// Returns `false` once every configured iteration has run.
    ///
    /// # Errors
    ///
    /// Returns an error if the diagram of the relaxed points cannot be built.
    pub fn execute_iteration(&mut self) -> Result<bool> {
        match self.relaxation.step(&mut self.rng)? {
            Some(points) => {
                self.history.push(points.to_vec());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Run the remaining iterations and return the outcome
    ///
    /// # Errors
    ///
    /// Returns an error if any iteration fails.
    pub fn run(mut self) -> Result<StippleOutcome> {
        while self.execute_iteration()? {}
        Ok(self.into_outcome())
    }

    /// Stop here and return what has been computed
    pub fn into_outcome(self) -> StippleOutcome {
        let (_, diagram) = self.relaxation.into_parts();
        StippleOutcome {
            diagram,
            history: self.history,
        }
    }

    /// Configuration of this run
    pub const fn config(&self) -> &StippleConfig {
        &self.config
    }

    /// Relaxation engine state
    pub const fn relaxation(&self) -> &LloydRelaxation<'a> {
        &self.relaxation
    }

    /// Snapshots recorded so far
    pub fn history(&self) -> &[Vec<Point>] {
        &self.history
    }
}

/// Run a complete stippling pass over `field`
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the field cannot be
/// sampled, or a Voronoi diagram cannot be built.
pub fn stipple(field: &DensityField, config: &StippleConfig) -> Result<StippleOutcome> {
    Stippler::new(field, *config)?.run()
}

/// Preprocess `image` with the configured quantization, then stipple it
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the image is
/// degenerate, or stippling fails.
pub fn stipple_image(
    image: &DynamicImage,
    config: &StippleConfig,
) -> Result<(DensityField, StippleOutcome)> {
    config.validate()?;
    let field = preprocess(image, config.quantization_levels)?;
    let outcome = stipple(&field, config)?;
    Ok((field, outcome))
}
