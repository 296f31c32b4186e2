//! Iterated cat map permutation of raster images
//!
//! Applies the area-preserving map `(x, y) -> (2x + y, x + y) mod N` to every
//! pixel of a square image, over and over, until the image returns to its
//! original arrangement or an iteration bound is reached. Along the way the
//! iterate farthest from the original under an L1 pixel metric is recorded.

#![forbid(unsafe_code)]

/// Pixel buffers and the permutation engine
pub mod engine;
/// Input/output operations, configuration and error handling
pub mod io;
/// Orbit tracking, recurrence detection and divergence
pub mod orbit;

pub use engine::{PixelBuffer, transform};
pub use io::error::{OrbitError, Result};
pub use orbit::{DetectionStrategy, OrbitResult, Retention, run, run_with_strategy};
