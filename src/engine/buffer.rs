//! Flat pixel buffers with explicit shape, decoupled from any image decoder

use crate::io::error::{OrbitError, Result};
use num_traits::{PrimInt, Unsigned};
use std::fmt::Debug;

/// Unsigned integer type usable as a single channel value
///
/// Channels are compared for equality by the permutation engine and
/// subtracted by the divergence metric, so any unsigned primitive works.
pub trait Channel: PrimInt + Unsigned + Debug + Send + Sync {}

impl<T> Channel for T where T: PrimInt + Unsigned + Debug + Send + Sync {}

/// Absolute difference between two channel values, widened to `u64`
pub fn channel_distance<T: Channel>(a: T, b: T) -> u64 {
    let difference = if a > b { a - b } else { b - a };
    difference.to_u64().unwrap_or(u64::MAX)
}

/// Check that a `width x height` grid can carry the cat map
///
/// # Errors
///
/// Returns `InvalidDimensions` if either side is zero or the grid is not
/// square; the map is only bijective on an N x N grid.
pub const fn validate_grid(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(OrbitError::InvalidDimensions {
            width,
            height,
            reason: "width and height must be positive",
        });
    }
    if width != height {
        return Err(OrbitError::InvalidDimensions {
            width,
            height,
            reason: "image must be square",
        });
    }
    Ok(())
}

/// Row-major pixel buffer with interleaved channels
///
/// Row 0 is the top row of the raster. The declared shape is not checked on
/// construction; every engine operation calls [`PixelBuffer::validate`] first
/// so that inconsistent buffers are reported instead of silently truncated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer<T = u8> {
    /// Width in pixels
    pub width: usize,
    /// Height in pixels
    pub height: usize,
    /// Channel values per pixel (1 gray, 2 gray+alpha, 3 RGB, 4 RGBA, ...)
    pub channels: usize,
    /// Interleaved channel values, `width * height * channels` entries
    pub data: Vec<T>,
}

impl<T: Channel> PixelBuffer<T> {
    /// Wrap raw channel data with a declared shape
    pub const fn new(width: usize, height: usize, channels: usize, data: Vec<T>) -> Self {
        Self {
            width,
            height,
            channels,
            data,
        }
    }

    /// Build a buffer by evaluating `f(column, row, channel)` for every value
    ///
    /// Rows are addressed top-down, matching the storage order.
    pub fn from_fn<F>(width: usize, height: usize, channels: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize, usize) -> T,
    {
        let mut data = Vec::with_capacity(width * height * channels);
        for row in 0..height {
            for col in 0..width {
                for channel in 0..channels {
                    data.push(f(col, row, channel));
                }
            }
        }
        Self::new(width, height, channels, data)
    }

    /// Number of channel values the declared shape requires
    pub const fn expected_len(&self) -> usize {
        self.width * self.height * self.channels
    }

    /// Number of pixels in the declared shape
    pub const fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Declared `(width, height)`
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Whether `other` has the same width, height and channel count
    pub const fn same_shape(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.channels == other.channels
    }

    /// Channel values of the pixel at `(column, row)`, top-down
    pub fn pixel(&self, col: usize, row: usize) -> Option<&[T]> {
        if col >= self.width || row >= self.height {
            return None;
        }
        let start = (row * self.width + col) * self.channels;
        self.data.get(start..start + self.channels)
    }

    /// Check that the buffer is a valid input for the cat map
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Width, height or channel count is zero (`InvalidDimensions`)
    /// - The image is not square, since the map is only bijective on an
    ///   N x N grid (`InvalidDimensions`)
    /// - The data length differs from `width * height * channels`
    ///   (`ChannelMismatch`)
    pub fn validate(&self) -> Result<()> {
        validate_grid(self.width, self.height)?;
        if self.channels == 0 {
            return Err(OrbitError::InvalidDimensions {
                width: self.width,
                height: self.height,
                reason: "pixels must have at least one channel",
            });
        }
        if self.data.len() != self.expected_len() {
            return Err(OrbitError::ChannelMismatch {
                width: self.width,
                height: self.height,
                channels: self.channels,
                expected: self.expected_len(),
                actual: self.data.len(),
            });
        }
        Ok(())
    }
}
