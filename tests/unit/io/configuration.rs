//! Tests for preprocessing constants and run defaults

#[cfg(test)]
mod tests {
    use stipple::io::configuration::{
        BLUR_SIGMA, BLUR_TRUNCATE, DEFAULT_ITERATIONS, DEFAULT_POINT_COUNT,
        DEFAULT_QUANTIZATION_LEVELS, DEFAULT_SEED, DEFAULT_WEIGHT_SCALE, DENSITY_SUFFIX,
        DIAGRAM_SUFFIX, LUMINANCE_WEIGHTS, OUTPUT_SUFFIX, RANDOM_SAMPLES_PER_PIXEL,
        SUPPORTED_EXTENSIONS,
    };

    // Tests that luminance weights sum to one so white stays white
    // Verified by changing the green weight
    #[test]
    fn test_luminance_weights_sum_to_one() {
        let total: f64 = LUMINANCE_WEIGHTS.iter().sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    // Tests the denoising blur parameters
    // Verified by changing sigma
    #[test]
    fn test_blur_parameters() {
        assert!((BLUR_SIGMA - 1.0).abs() < f64::EPSILON);
        assert!((BLUR_TRUNCATE - 4.0).abs() < f64::EPSILON);
    }

    // Tests run defaults
    // Verified by changing the default seed
    #[test]
    fn test_run_defaults() {
        assert_eq!(DEFAULT_POINT_COUNT, 5000);
        assert_eq!(DEFAULT_ITERATIONS, 40);
        assert_eq!(DEFAULT_SEED, 111);
        assert_eq!(DEFAULT_QUANTIZATION_LEVELS, 0);
        assert!((DEFAULT_WEIGHT_SCALE - 1.0).abs() < f64::EPSILON);
        assert_eq!(RANDOM_SAMPLES_PER_PIXEL, 10);
    }

    // Tests that output suffixes are distinct so outputs never overwrite each other
    // Verified by reusing the stipple suffix for diagrams
    #[test]
    fn test_output_suffixes_distinct() {
        assert_ne!(OUTPUT_SUFFIX, DIAGRAM_SUFFIX);
        assert_ne!(OUTPUT_SUFFIX, DENSITY_SUFFIX);
        assert_ne!(DIAGRAM_SUFFIX, DENSITY_SUFFIX);
        assert!(SUPPORTED_EXTENSIONS.contains(&"png"));
        assert!(SUPPORTED_EXTENSIONS.iter().all(|ext| *ext == ext.to_lowercase()));
    }
}
