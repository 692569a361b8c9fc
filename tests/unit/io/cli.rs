//! Tests for command-line parsing, file discovery and output naming

#[cfg(test)]
mod tests {
    use clap::Parser;
    use image::{GrayImage, Luma};
    use std::ffi::OsString;
    use std::path::{Path, PathBuf};
    use stipple::algorithm::sampling::SamplingMode;
    use stipple::io::cli::{
        Cli, FileProcessor, animation_output_path, density_output_path, diagram_output_path,
        stipple_output_path,
    };
    use stipple::io::configuration::{DEFAULT_ITERATIONS, DEFAULT_POINT_COUNT, DEFAULT_SEED};

    fn write_gradient(path: &Path) {
        GrayImage::from_fn(16, 12, |x, y| Luma([u8::try_from((x * 12 + y) % 256).unwrap_or(0)]))
            .save(path)
            .unwrap();
    }

    fn target_args(target: &Path) -> Vec<OsString> {
        vec![
            OsString::from("stipple"),
            target.as_os_str().to_owned(),
            OsString::from("-q"),
        ]
    }

    // Tests CLI parsing with only the required target argument
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["stipple", "test.png"]);

        assert_eq!(cli.target, PathBuf::from("test.png"));
        assert_eq!(cli.points, DEFAULT_POINT_COUNT);
        assert_eq!(cli.iterations, DEFAULT_ITERATIONS);
        assert_eq!(cli.seed, DEFAULT_SEED);
        assert_eq!(cli.sampling_mode(), SamplingMode::Random);
        assert!(cli.skip_existing());
        assert!(cli.should_show_progress());
    }

    // Tests short flags and the configuration they build
    // Verified by changing short flag definitions
    #[test]
    fn test_cli_short_flags_build_config() {
        let cli = Cli::parse_from([
            "stipple", "in.jpg", "-n", "300", "-i", "12", "-l", "4", "-e", "-s", "9", "-w", "2.5",
            "-q",
        ]);
        let config = cli.stipple_config();

        assert_eq!(config.point_count, 300);
        assert_eq!(config.iterations, 12);
        assert_eq!(config.quantization_levels, 4);
        assert_eq!(config.sampling_mode, SamplingMode::Exhaustive);
        assert_eq!(config.seed, 9);
        assert!((config.weight_scale - 2.5).abs() < f64::EPSILON);
        assert!(!cli.should_show_progress());
    }

    // Tests that negative iteration counts are rejected at parse time
    // Verified by switching the field to a signed integer
    #[test]
    fn test_cli_rejects_negative_iterations() {
        assert!(Cli::try_parse_from(["stipple", "in.png", "--iterations", "-3"]).is_err());
    }

    // Tests output naming next to the input
    // Verified by keeping the input extension on the stipple output
    #[test]
    fn test_output_paths() {
        let input = Path::new("photos/cat.jpg");

        assert_eq!(stipple_output_path(input), PathBuf::from("photos/cat_stipple.png"));
        assert_eq!(
            animation_output_path(input, 5000, 40),
            PathBuf::from("photos/cat_stipple_5000_40.gif")
        );
        assert_eq!(diagram_output_path(input), PathBuf::from("photos/cat_voronoi.svg"));
        assert_eq!(density_output_path(input), PathBuf::from("photos/cat_density.png"));
    }

    // Tests that unsupported or missing targets are configuration errors
    // Verified by accepting any file extension
    #[test]
    fn test_invalid_targets() {
        let temp_dir = tempfile::tempdir().unwrap();
        let notes = temp_dir.path().join("notes.txt");
        std::fs::write(&notes, "not an image").unwrap();

        let processor = FileProcessor::new(Cli::parse_from(target_args(&notes)));
        assert!(processor.collect_files().unwrap_err().is_configuration());

        let missing = temp_dir.path().join("absent");
        let processor = FileProcessor::new(Cli::parse_from(target_args(&missing)));
        assert!(processor.collect_files().unwrap_err().is_configuration());
    }

    // Tests a full run over a directory, then skipping on the second pass
    // Verified by ignoring existing outputs
    #[test]
    fn test_process_directory_and_skip_existing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let input = temp_dir.path().join("gradient.png");
        write_gradient(&input);

        let mut args = target_args(temp_dir.path());
        args.extend(["-n", "12", "-i", "2", "-a", "-d", "--density"].map(OsString::from));
        let mut processor = FileProcessor::new(Cli::parse_from(args.clone()));
        processor.process().unwrap();

        assert!(stipple_output_path(&input).exists());
        assert!(animation_output_path(&input, 12, 2).exists());
        assert!(diagram_output_path(&input).exists());
        assert!(density_output_path(&input).exists());

        let rerun = FileProcessor::new(Cli::parse_from(args.clone()));
        assert!(rerun.collect_files().unwrap().is_empty());

        args.push(OsString::from("--no-skip"));
        let forced = FileProcessor::new(Cli::parse_from(args));
        assert_eq!(forced.collect_files().unwrap(), vec![input]);
    }
}
