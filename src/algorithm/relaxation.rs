//! Lloyd relaxation over density-weighted Voronoi cells
//!
//! Each iteration builds the Voronoi diagram of the current points, moves
//! every point with a bounded cell to that cell's weighted centroid and keeps
//! every other point where it is. The engine always runs its configured
//! number of iterations; there is no early exit on small displacement.

use crate::algorithm::centroid::density_centroid;
use crate::algorithm::sampling::SamplingMode;
use crate::io::error::{Result, WithIteration, invalid_parameter};
use crate::spatial::{DensityField, Point, VoronoiCell, VoronoiDiagram};
use rand::Rng;

/// Progress of a relaxation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelaxationState {
    /// No iteration has run yet
    Initialized,
    /// The given number of iterations has completed, more remain
    Iterating(usize),
    /// All configured iterations have completed
    Converged,
}

/// Points produced by one relaxation step
#[derive(Debug, Clone, PartialEq)]
pub struct RelaxationStep {
    /// New positions, index-aligned with the input points
    pub points: Vec<Point>,
    /// Points left in place because their cell was unbounded
    pub frozen: usize,
}

/// Move every point with a bounded cell to its weighted centroid
///
/// Point `i` always maps to cell `i` of `diagram`, so ordering is preserved.
///
/// # Errors
///
/// Returns an error if a bounded cell has no vertices, which a diagram built
/// by [`VoronoiDiagram::build`] never produces.
pub fn relax_points<R: Rng + ?Sized>(
    diagram: &VoronoiDiagram,
    points: &[Point],
    field: &DensityField,
    mode: SamplingMode,
    rng: &mut R,
) -> Result<RelaxationStep> {
    let mut next = Vec::with_capacity(points.len());
    let mut frozen = 0;

    for (index, &point) in points.iter().enumerate() {
        match diagram.cell(index).and_then(VoronoiCell::bounded_vertices) {
            Some(vertices) => next.push(density_centroid(vertices, field, mode, rng)?),
            None => {
                frozen += 1;
                next.push(point);
            }
        }
    }

    Ok(RelaxationStep {
        points: next,
        frozen,
    })
}

/// Fixed-iteration Lloyd relaxation engine
///
/// Holds the current point set exclusively; each step replaces it wholesale.
#[derive(Debug, Clone)]
pub struct LloydRelaxation<'a> {
    field: &'a DensityField,
    sampling_mode: SamplingMode,
    iterations: usize,
    completed: usize,
    points: Vec<Point>,
    diagram: VoronoiDiagram,
    frozen_last_step: usize,
}

impl<'a> LloydRelaxation<'a> {
    /// Prepare a run over `initial_points` and build their diagram
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `initial_points` is empty
    /// - The triangulation rejects one of the points
    pub fn new(
        field: &'a DensityField,
        initial_points: Vec<Point>,
        iterations: usize,
        sampling_mode: SamplingMode,
    ) -> Result<Self> {
        if initial_points.is_empty() {
            return Err(invalid_parameter(
                "initial_points",
                &0,
                &"relaxation needs at least one point",
            ));
        }

        let diagram = VoronoiDiagram::build(&initial_points, field.width(), field.height())
            .with_iteration(0)?;

        Ok(Self {
            field,
            sampling_mode,
            iterations,
            completed: 0,
            points: initial_points,
            diagram,
            frozen_last_step: 0,
        })
    }

    /// Current position in the run
    pub const fn state(&self) -> RelaxationState {
        if self.completed >= self.iterations {
            RelaxationState::Converged
        } else if self.completed == 0 {
            RelaxationState::Initialized
        } else {
            RelaxationState::Iterating(self.completed)
        }
    }

    /// Run one iteration, returning the new points
    ///
    /// Returns `Ok(None)` once every configured iteration has run.
    ///
    /// # Errors
    ///
    /// Returns an error if the triangulation rejects a relaxed point.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Option<&[Point]>> {
        if self.state() == RelaxationState::Converged {
            return Ok(None);
        }

        let iteration = self.completed + 1;
        let step = relax_points(
            &self.diagram,
            &self.points,
            self.field,
            self.sampling_mode,
            rng,
        )?;
        let diagram = VoronoiDiagram::build(&step.points, self.field.width(), self.field.height())
            .with_iteration(iteration)?;

        self.points = step.points;
        self.diagram = diagram;
        self.frozen_last_step = step.frozen;
        self.completed = iteration;

        Ok(Some(&self.points))
    }

    /// Current points
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Diagram of the current points
    pub const fn diagram(&self) -> &VoronoiDiagram {
        &self.diagram
    }

    /// Iterations run so far
    pub const fn completed_iterations(&self) -> usize {
        self.completed
    }

    /// Iterations configured for the run
    pub const fn total_iterations(&self) -> usize {
        self.iterations
    }

    /// Points frozen by unbounded cells during the most recent step
    pub const fn frozen_last_step(&self) -> usize {
        self.frozen_last_step
    }

    /// Release the final points and their diagram
    pub fn into_parts(self) -> (Vec<Point>, VoronoiDiagram) {
        (self.points, self.diagram)
    }
}
