//! Tests for the Lloyd relaxation engine and its state machine

#[cfg(test)]
mod tests {
    use ndarray::Array2;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use stipple::algorithm::relaxation::{LloydRelaxation, RelaxationState, relax_points};
    use stipple::algorithm::sampling::SamplingMode;
    use stipple::spatial::{DensityField, Point, VoronoiDiagram};

    fn hotspot_field(x: usize, y: usize) -> DensityField {
        let mut values = Array2::zeros((10, 10));
        values[[y, x]] = 1.0;
        DensityField::from_array(values).unwrap()
    }

    // Tests that a lone point moves onto the only dense pixel and stays there
    // Verified by freezing single-generator cells
    #[test]
    fn test_single_point_moves_to_hotspot() {
        let field = hotspot_field(3, 4);
        let mut rng = StdRng::seed_from_u64(0);
        let mut engine =
            LloydRelaxation::new(&field, vec![Point::new(7.0, 1.0)], 2, SamplingMode::Exhaustive)
                .unwrap();

        let first = engine.step(&mut rng).unwrap().map(<[Point]>::to_vec);
        assert_eq!(first, Some(vec![Point::new(3.0, 4.0)]));

        let second = engine.step(&mut rng).unwrap().map(<[Point]>::to_vec);
        assert_eq!(second, Some(vec![Point::new(3.0, 4.0)]));
    }

    // Tests the progression through the relaxation states
    // Verified by reporting Converged one step early
    #[test]
    fn test_state_progression() {
        let field = hotspot_field(3, 4);
        let mut rng = StdRng::seed_from_u64(0);
        let mut engine =
            LloydRelaxation::new(&field, vec![Point::new(7.0, 1.0)], 2, SamplingMode::Exhaustive)
                .unwrap();

        assert_eq!(engine.state(), RelaxationState::Initialized);
        assert!(engine.step(&mut rng).unwrap().is_some());
        assert_eq!(engine.state(), RelaxationState::Iterating(1));
        assert!(engine.step(&mut rng).unwrap().is_some());
        assert_eq!(engine.state(), RelaxationState::Converged);
        assert!(engine.step(&mut rng).unwrap().is_none());
        assert_eq!(engine.completed_iterations(), 2);
        assert_eq!(engine.total_iterations(), 2);
    }

    // Tests that zero iterations means nothing runs
    // Verified by running one iteration unconditionally
    #[test]
    fn test_zero_iterations_converged_immediately() {
        let field = hotspot_field(3, 4);
        let mut rng = StdRng::seed_from_u64(0);
        let initial = vec![Point::new(7.0, 1.0), Point::new(2.0, 2.0)];
        let mut engine =
            LloydRelaxation::new(&field, initial.clone(), 0, SamplingMode::Random).unwrap();

        assert_eq!(engine.state(), RelaxationState::Converged);
        assert!(engine.step(&mut rng).unwrap().is_none());
        assert_eq!(engine.points(), initial.as_slice());
    }

    // Tests that an empty point set is rejected
    // Verified by building an empty diagram
    #[test]
    fn test_empty_points_rejected() {
        let field = hotspot_field(3, 4);
        let error = LloydRelaxation::new(&field, Vec::new(), 3, SamplingMode::Random).unwrap_err();

        assert!(error.is_configuration());
    }

    // Tests that points with unbounded cells keep their position
    // Verified by moving frozen points to their vertex mean
    #[test]
    fn test_unbounded_points_frozen() {
        let field = hotspot_field(3, 4);
        let mut rng = StdRng::seed_from_u64(0);
        let points = vec![
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
            Point::new(3.0, 3.0),
        ];
        let diagram = VoronoiDiagram::build(&points, 10, 10).unwrap();

        let step = relax_points(&diagram, &points, &field, SamplingMode::Random, &mut rng).unwrap();

        assert_eq!(step.frozen, 3);
        assert_eq!(step.points, points);
    }

    // Tests that relaxation preserves point count and order, moving only the interior point
    // Verified by rebuilding points in triangulation order
    #[test]
    fn test_relaxation_preserves_order() {
        let field = DensityField::from_array(Array2::from_elem((10, 10), 1.0)).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let mut points = Vec::new();
        for row in 0..3 {
            for col in 0..3 {
                points.push(Point::new(f64::from(col) * 3.0 + 1.0, f64::from(row) * 3.0 + 1.0));
            }
        }
        points[4] = Point::new(4.5, 4.0);
        let diagram = VoronoiDiagram::build(&points, 10, 10).unwrap();

        let step =
            relax_points(&diagram, &points, &field, SamplingMode::Exhaustive, &mut rng).unwrap();

        assert_eq!(step.points.len(), 9);
        assert_eq!(step.frozen, 8);
        for (index, (before, after)) in points.iter().zip(&step.points).enumerate() {
            if index != 4 {
                assert_eq!(before, after);
            }
        }
    }

    // Tests that the engine exposes the diagram of its current points
    // Verified by keeping the initial diagram after a step
    #[test]
    fn test_diagram_tracks_points() {
        let field = hotspot_field(3, 4);
        let mut rng = StdRng::seed_from_u64(0);
        let mut engine =
            LloydRelaxation::new(&field, vec![Point::new(7.0, 1.0)], 1, SamplingMode::Exhaustive)
                .unwrap();
        engine.step(&mut rng).unwrap();

        assert_eq!(engine.diagram().generators(), engine.points());
        assert_eq!(engine.frozen_last_step(), 0);

        let (points, diagram) = engine.into_parts();
        assert_eq!(diagram.generators(), points.as_slice());
    }
}
