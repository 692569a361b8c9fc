//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use std::error::Error;
    use stipple::StippleError;
    use stipple::io::error::{
        WithIteration, computation_error, degenerate_input, invalid_parameter,
    };

    // Tests error source chaining works correctly
    // Verified by breaking source chain
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = StippleError::FileSystem {
            path: "/tmp/test.png".into(),
            operation: "read",
            source: io_error,
        };

        assert!(error.source().is_some());
        assert!(error.to_string().contains("/tmp/test.png"));
    }

    // Tests InvalidParameter error contains all fields
    // Verified by omitting value from message
    #[test]
    fn test_invalid_parameter_error() {
        let error = invalid_parameter("point_count", &0, &"must be positive");

        let message = error.to_string();
        assert!(message.contains("point_count"));
        assert!(message.contains("'0'"));
        assert!(message.contains("must be positive"));
        assert!(error.is_configuration());
        assert!(!error.is_degenerate_input());
        assert!(error.source().is_none());
    }

    // Tests degenerate input classification and message
    // Verified by classifying degenerate input as configuration
    #[test]
    fn test_degenerate_input_error() {
        let error = degenerate_input("normalization", &"inverted image is zero everywhere");

        assert!(error.is_degenerate_input());
        assert!(!error.is_configuration());
        assert!(error.to_string().contains("normalization"));
    }

    // Tests that the relaxation iteration is attached to triangulation failures
    // Verified by leaving the iteration at zero
    #[test]
    fn test_with_iteration_patches_triangulation() {
        let failed: Result<(), StippleError> = Err(StippleError::Triangulation {
            iteration: 0,
            reason: "cannot insert (NaN, 1)".to_string(),
        });

        let error = failed.with_iteration(7).unwrap_err();
        assert!(error.to_string().contains("iteration 7"));
    }

    // Tests that other errors pass through unchanged
    // Verified by converting every error to a triangulation failure
    #[test]
    fn test_with_iteration_leaves_other_errors() {
        let failed: Result<(), StippleError> = Err(computation_error("blur", &"bad kernel"));

        let error = failed.with_iteration(3).unwrap_err();
        assert!(matches!(error, StippleError::Computation { .. }));
    }

    // Tests conversion from IO errors
    // Verified by dropping the source
    #[test]
    fn test_from_io_error() {
        let error: StippleError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied").into();

        assert!(matches!(error, StippleError::FileSystem { .. }));
        assert!(error.source().is_some());
    }

    // Tests ImageExport error with IO source
    // Verified by excluding source error from message
    #[test]
    fn test_image_export_error() {
        let image_error = image::ImageError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "access denied",
        ));

        let error = StippleError::ImageExport {
            path: "/restricted/output.png".into(),
            source: image_error,
        };

        let message = error.to_string();
        assert!(message.contains("/restricted/output.png"));
        assert!(message.contains("access denied"));
        assert!(error.source().is_some());
    }
}
