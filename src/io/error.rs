//! Error types for the permutation engine, orbit tracker and file front end

use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type for all crate operations
#[derive(Debug)]
pub enum OrbitError {
    /// Image shape cannot carry the cat map
    ///
    /// Occurs when:
    /// - Width or height is zero
    /// - The image is not square
    /// - Pixels have no channels
    InvalidDimensions {
        /// Declared width
        width: usize,
        /// Declared height
        height: usize,
        /// Which requirement was violated
        reason: &'static str,
    },

    /// Pixel data length disagrees with the declared shape
    ChannelMismatch {
        /// Declared width
        width: usize,
        /// Declared height
        height: usize,
        /// Declared channels per pixel
        channels: usize,
        /// Channel values required by the declared shape
        expected: usize,
        /// Channel values actually present
        actual: usize,
    },

    /// Iteration bound is not positive
    InvalidBound {
        /// Bound supplied by the caller
        max_iterations: usize,
    },

    /// Coordinate map produced a collision or left a gap
    NotBijective {
        /// Grid width
        width: usize,
        /// Grid height
        height: usize,
        /// Which defect was observed
        reason: &'static str,
    },

    /// Failed to load a source image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save an iterate or animation to disk
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

    /// Front-end parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Internal computation produced an invalid result
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for OrbitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions {
                width,
                height,
                reason,
            } => {
                write!(f, "Invalid dimensions {width}x{height}: {reason}")
            }
            Self::ChannelMismatch {
                width,
                height,
                channels,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Buffer declared {width}x{height} with {channels} channel(s) needs {expected} values but holds {actual}"
                )
            }
            Self::InvalidBound { max_iterations } => {
                write!(
                    f,
                    "Invalid iteration bound {max_iterations}: must be at least 1"
                )
            }
            Self::NotBijective {
                width,
                height,
                reason,
            } => {
                write!(f, "Cat map is not bijective on {width}x{height}: {reason}")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
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
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for OrbitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for crate results
pub type Result<T> = std::result::Result<T, OrbitError>;

/// Attaches a filesystem path to errors that were converted without one
pub trait WithPath<T> {
    /// Replace the placeholder path of image and I/O errors with `path`
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path applied
    fn with_path(self, path: &Path) -> Result<T>;
}

impl<T, E> WithPath<T> for std::result::Result<T, E>
where
    E: Into<OrbitError>,
{
    fn with_path(self, path: &Path) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            match &mut error {
                OrbitError::ImageLoad { path: target, .. }
                | OrbitError::ImageExport { path: target, .. }
                | OrbitError::FileSystem { path: target, .. } => {
                    *target = path.to_path_buf();
                }
                _ => {}
            }
            error
        })
    }
}

impl From<image::ImageError> for OrbitError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for OrbitError {
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
) -> OrbitError {
    OrbitError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> OrbitError {
    OrbitError::Computation {
        operation,
        reason: reason.to_string(),
    }
}
