//! L1 pixel dissimilarity and first-maximum divergence tracking

use crate::engine::buffer::{Channel, PixelBuffer, channel_distance};
use crate::io::error::{OrbitError, Result};

/// Iterate index paired with its dissimilarity score against the original
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Divergence {
    /// Position in the orbit, 1-based from the first transformed iterate
    pub index: usize,
    /// Sum of absolute channel differences against the original
    pub score: u64,
}

/// Sum over all pixels and channels of `|a - b|`
///
/// Exact integer arithmetic; saturates at `u64::MAX`.
///
/// # Errors
///
/// Returns an error if either buffer fails validation or the shapes differ.
pub fn dissimilarity<T: Channel>(a: &PixelBuffer<T>, b: &PixelBuffer<T>) -> Result<u64> {
    a.validate()?;
    b.validate()?;
    if !a.same_shape(b) {
        return Err(OrbitError::ChannelMismatch {
            width: a.width,
            height: a.height,
            channels: a.channels,
            expected: a.expected_len(),
            actual: b.data.len(),
        });
    }

    Ok(a.data
        .iter()
        .zip(&b.data)
        .fold(0u64, |total, (&x, &y)| {
            total.saturating_add(channel_distance(x, y))
        }))
}

/// Running maximum over observed scores
///
/// Only a strictly greater score replaces the current best, so ties keep the
/// first index that reached the maximum.
#[derive(Debug, Clone, Default)]
pub struct DivergenceTracker {
    best: Option<Divergence>,
}

impl DivergenceTracker {
    /// Create a tracker with nothing observed
    pub const fn new() -> Self {
        Self { best: None }
    }

    /// Record the score of iterate `index`, returning whether it became the best
    pub fn observe(&mut self, index: usize, score: u64) -> bool {
        let improved = self.best.is_none_or(|best| score > best.score);
        if improved {
            self.best = Some(Divergence { index, score });
        }
        improved
    }

    /// Best record so far, `None` until a score has been observed
    pub const fn best(&self) -> Option<Divergence> {
        self.best
    }
}
