//! Per-iteration displacement statistics over a relaxation history
//!
//! Purely observational: the relaxation always runs its configured number of
//! iterations, these numbers only describe how far points travelled.

use crate::spatial::Point;

/// Movement between two consecutive point sets
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationStats {
    /// Iteration that produced the later snapshot (1-based)
    pub iteration: usize,
    /// Sum of Euclidean displacements over all points
    pub total_displacement: f64,
    /// Largest single displacement
    pub max_displacement: f64,
    /// Points that did not move at all
    pub stationary_points: usize,
}

impl IterationStats {
    /// Compare two index-aligned snapshots
    ///
    /// Returns `None` when the snapshots differ in length.
    pub fn between(iteration: usize, before: &[Point], after: &[Point]) -> Option<Self> {
        if before.len() != after.len() {
            return None;
        }

        let mut total_displacement = 0.0;
        let mut max_displacement: f64 = 0.0;
        let mut stationary_points = 0;

        for (old, new) in before.iter().zip(after) {
            let distance = (new.x - old.x).hypot(new.y - old.y);
            total_displacement += distance;
            max_displacement = max_displacement.max(distance);
            if distance == 0.0 {
                stationary_points += 1;
            }
        }

        Some(Self {
            iteration,
            total_displacement,
            max_displacement,
            stationary_points,
        })
    }

    /// Average displacement per point
    pub fn mean_displacement(&self, point_count: usize) -> f64 {
        if point_count == 0 {
            0.0
        } else {
            self.total_displacement / point_count as f64
        }
    }
}

/// Displacement statistics for every iteration of a run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvergenceReport {
    /// One entry per completed iteration
    pub iterations: Vec<IterationStats>,
}

impl ConvergenceReport {
    /// Summarize a history whose first entry is the initial sample
    pub fn from_history(history: &[Vec<Point>]) -> Self {
        let iterations = history
            .windows(2)
            .enumerate()
            .filter_map(|(i, pair)| match pair {
                [before, after] => IterationStats::between(i + 1, before, after),
                _ => None,
            })
            .collect();
        Self { iterations }
    }

    /// Statistics for the final iteration
    pub fn last(&self) -> Option<&IterationStats> {
        self.iterations.last()
    }

    /// Whether the largest displacement of the last iteration is below `tolerance`
    pub fn settled(&self, tolerance: f64) -> bool {
        self.last()
            .is_some_and(|stats| stats.max_displacement < tolerance)
    }
}
