//! Error types for preprocessing, relaxation and export

use std::fmt;
use std::path::PathBuf;

/// Main error type for all stippling operations
#[derive(Debug)]
pub enum StippleError {
    /// Failed to load source image from filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Source data doesn't meet algorithm requirements
    InvalidSourceData {
        /// Description of what's wrong with the source data
        reason: String,
    },

    /// Configuration or argument validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Density field carries no weight anywhere
    ///
    /// Raised when the inverted image (or its quantized form) is zero
    /// everywhere, which would otherwise divide by zero during normalization
    /// or leave nothing to sample from.
    DegenerateInput {
        /// Stage that detected the degenerate field
        stage: &'static str,
        /// Description of the failure
        reason: String,
    },

    /// Delaunay triangulation rejected a generator point
    Triangulation {
        /// Relaxation iteration during which the insertion failed
        iteration: usize,
        /// Description of the rejected point
        reason: String,
    },

    /// Failed to save generated output to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Numerical computation produced invalid result
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for StippleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::DegenerateInput { stage, reason } => {
                write!(f, "Degenerate density field during {stage}: {reason}")
            }
            Self::Triangulation { iteration, reason } => {
                write!(
                    f,
                    "Voronoi construction failed at iteration {iteration}: {reason}"
                )
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for StippleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for stippling results
pub type Result<T> = std::result::Result<T, StippleError>;

impl StippleError {
    /// Whether the error stems from caller-supplied configuration
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }

    /// Whether the error stems from a density field with no usable weight
    pub const fn is_degenerate_input(&self) -> bool {
        matches!(self, Self::DegenerateInput { .. })
    }
}

/// Attaches relaxation state to errors raised below the engine
pub trait WithIteration<T> {
    /// Record the iteration during which the error surfaced
    ///
    /// # Errors
    ///
    /// Propagates the original error with the iteration applied
    fn with_iteration(self, iteration: usize) -> Result<T>;
}

impl<T, E> WithIteration<T> for std::result::Result<T, E>
where
    E: Into<StippleError>,
{
    fn with_iteration(self, iteration: usize) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only triangulation failures carry an iteration slot
            if let StippleError::Triangulation {
                iteration: slot, ..
            } = &mut error
            {
                *slot = iteration;
            }
            error
        })
    }
}

impl From<std::io::Error> for StippleError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> StippleError {
    StippleError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a degenerate input error
pub fn degenerate_input(stage: &'static str, reason: &impl ToString) -> StippleError {
    StippleError::DegenerateInput {
        stage,
        reason: reason.to_string(),
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> StippleError {
    StippleError::Computation {
        operation,
        reason: reason.to_string(),
    }
}
