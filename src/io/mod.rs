//! Command-line front end, image files, progress display and errors

/// Command-line interface and batch processing of image files
pub mod cli;
/// Defaults and constants for the front end
pub mod configuration;
/// Error type shared by the whole crate
pub mod error;
/// Conversion between image files and pixel buffers
pub mod image;
/// Per-file iteration progress bars
pub mod progress;
/// Animated GIF export of an orbit
pub mod visualization;
