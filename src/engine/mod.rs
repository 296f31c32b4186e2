//! Pixel buffers and the cat map permutation applied to them

/// Flat pixel buffers with explicit shape and channel count
pub mod buffer;
/// The coordinate map and the single-pass transform
pub mod permutation;

pub use buffer::PixelBuffer;
pub use permutation::transform;
