//! Algorithm constants and runtime configuration defaults

// Preprocessing
/// Standard deviation of the denoising blur, in pixels
pub const BLUR_SIGMA: f64 = 1.0;
/// Blur kernel radius expressed in standard deviations
pub const BLUR_TRUNCATE: f64 = 4.0;
/// Luminance weights applied to linear RGB channels
pub const LUMINANCE_WEIGHTS: [f64; 3] = [0.2125, 0.7154, 0.0721];

// Centroid estimation
/// Random candidates drawn per unit of bounding box area
pub const RANDOM_SAMPLES_PER_PIXEL: usize = 10;

// Default values for configurable parameters
/// Number of stipple points
pub const DEFAULT_POINT_COUNT: usize = 5000;
/// Number of Lloyd iterations
pub const DEFAULT_ITERATIONS: usize = 40;
/// Fixed seed for reproducible stippling
pub const DEFAULT_SEED: u64 = 111;
/// Quantization levels (0 disables quantization)
pub const DEFAULT_QUANTIZATION_LEVELS: usize = 0;
/// Exponent applied to density before initial sampling
pub const DEFAULT_WEIGHT_SCALE: f64 = 1.0;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Suffix added to stipple image filenames
pub const OUTPUT_SUFFIX: &str = "_stipple";
/// Suffix added to Voronoi diagram filenames
pub const DIAGRAM_SUFFIX: &str = "_voronoi";
/// Suffix added to density preview filenames
pub const DENSITY_SUFFIX: &str = "_density";
/// Image extensions picked up when processing a directory
pub const SUPPORTED_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "bmp", "tif", "tiff"];
/// Radius of a rendered stipple dot, in pixels
pub const STIPPLE_DOT_RADIUS: f64 = 1.0;
/// Iterations per second of animation
pub const ITERATIONS_PER_ANIMATION_SECOND: usize = 5;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;
/// Multiplier applied to the delay of the final animation frame
pub const FINAL_FRAME_HOLD: u32 = 10;
