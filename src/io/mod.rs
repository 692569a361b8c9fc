//! Input/output: command line, configuration, errors and exports

/// Command-line parsing and batch file processing
pub mod cli;
/// Algorithm constants and defaults
pub mod configuration;
/// Error types shared across the crate
pub mod error;
/// Image loading and PNG export
pub mod image;
/// Terminal progress bars
pub mod progress;
/// GIF animation and SVG diagram export
pub mod visualization;
