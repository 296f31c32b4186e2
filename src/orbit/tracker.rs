//! Iterated application of the cat map with recurrence detection
//!
//! The tracker owns the orbit for the duration of a run. Each [`OrbitTracker::step`]
//! produces exactly one iterate, scores it against the original, updates the
//! divergence record and checks for recurrence with the configured
//! [`DetectionStrategy`]. Callers that want progress reporting or cancellation
//! drive `step` themselves; [`run`] drives it to completion.
//!
//! Under [`Retention::Endpoints`] only the original, the latest iterate and the
//! most diverged iterate are held, so memory stays constant in the bound.

use crate::engine::buffer::{Channel, PixelBuffer};
use crate::engine::permutation::{transform, transform_and_compare};
use crate::io::error::{OrbitError, Result};
use crate::orbit::divergence::{Divergence, DivergenceTracker, dissimilarity};

/// How an iterate is recognised as a return to the original
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetectionStrategy {
    /// Compare every written pixel with the original during the transform pass
    PixelEquality,
    /// Declare recurrence when the L1 score against the original is zero
    #[default]
    ScoreBased,
}

/// Which iterates a run keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Retention {
    /// Every iterate, in order, starting with the original
    #[default]
    Full,
    /// The original, the latest iterate and the most diverged iterate
    Endpoints,
}

/// Outcome of a single tracker step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A new iterate was produced and differs from the original
    Advanced {
        /// Index of the new iterate
        index: usize,
        /// Its dissimilarity score against the original
        score: u64,
    },
    /// A new iterate was produced and equals the original
    Recurred {
        /// Smallest positive index that reproduces the original
        period: usize,
    },
    /// No iterate was produced; the bound is reached or a period was found
    Finished,
}

/// Everything a run leaves behind
#[derive(Debug, Clone)]
pub struct OrbitResult<T = u8> {
    /// Original image followed by every iterate produced under
    /// [`Retention::Full`]; only the original under [`Retention::Endpoints`]
    pub iterates: Vec<PixelBuffer<T>>,
    /// Index of the first iterate equal to the original, if one was reached
    pub period: Option<usize>,
    /// First iterate with the largest score against the original
    pub divergence: Option<Divergence>,
    iterations: usize,
    latest: Option<PixelBuffer<T>>,
    diverged: Option<PixelBuffer<T>>,
}

impl<T: Channel> OrbitResult<T> {
    /// The untouched input image
    pub fn original(&self) -> Option<&PixelBuffer<T>> {
        self.iterates.first()
    }

    /// The iterate that reproduced the original, if a period was found
    ///
    /// A run stops at its period, so this is also the last iterate.
    pub fn recovered(&self) -> Option<&PixelBuffer<T>> {
        self.period.and(self.last())
    }

    /// The iterate farthest from the original
    pub fn most_diverged(&self) -> Option<&PixelBuffer<T>> {
        self.diverged.as_ref().or_else(|| {
            self.divergence
                .and_then(|divergence| self.iterates.get(divergence.index))
        })
    }

    /// The last iterate produced
    pub fn last(&self) -> Option<&PixelBuffer<T>> {
        self.latest.as_ref().or_else(|| self.iterates.last())
    }

    /// Number of transforms applied, excluding the original
    pub const fn iterations(&self) -> usize {
        self.iterations
    }
}

/// Step-wise driver for one orbit run
#[derive(Debug, Clone)]
pub struct OrbitTracker<T = u8> {
    strategy: DetectionStrategy,
    retention: Retention,
    max_iterations: usize,
    iteration: usize,
    // Original first, then the kept iterates; at most two under `Endpoints`
    iterates: Vec<PixelBuffer<T>>,
    diverged: Option<PixelBuffer<T>>,
    divergence: DivergenceTracker,
    period: Option<usize>,
}

impl<T: Channel> OrbitTracker<T> {
    /// Validate the inputs and prepare a run that keeps every iterate
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `max_iterations` is zero (`InvalidBound`)
    /// - The original has a zero or non-square shape (`InvalidDimensions`)
    /// - The original's data disagrees with its shape (`ChannelMismatch`)
    pub fn new(
        original: PixelBuffer<T>,
        max_iterations: usize,
        strategy: DetectionStrategy,
    ) -> Result<Self> {
        Self::with_retention(original, max_iterations, strategy, Retention::Full)
    }

    /// Validate the inputs and prepare a run keeping the iterates `retention` asks for
    ///
    /// # Errors
    ///
    /// Same conditions as [`OrbitTracker::new`].
    pub fn with_retention(
        original: PixelBuffer<T>,
        max_iterations: usize,
        strategy: DetectionStrategy,
        retention: Retention,
    ) -> Result<Self> {
        if max_iterations == 0 {
            return Err(OrbitError::InvalidBound { max_iterations });
        }
        original.validate()?;

        let capacity = match retention {
            Retention::Full => max_iterations.saturating_add(1).min(1024),
            Retention::Endpoints => 2,
        };
        let mut iterates = Vec::with_capacity(capacity);
        iterates.push(original);

        Ok(Self {
            strategy,
            retention,
            max_iterations,
            iteration: 0,
            iterates,
            diverged: None,
            divergence: DivergenceTracker::new(),
            period: None,
        })
    }

    /// Index of the most recent iterate, 0 before the first step
    pub const fn iteration(&self) -> usize {
        self.iteration
    }

    /// Upper bound on the number of iterates this run may produce
    pub const fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Strategy used for recurrence detection
    pub const fn strategy(&self) -> DetectionStrategy {
        self.strategy
    }

    /// Which iterates this run keeps
    pub const fn retention(&self) -> Retention {
        self.retention
    }

    /// Number of pixel buffers currently held, original included
    pub fn retained_buffers(&self) -> usize {
        self.iterates.len() + usize::from(self.diverged.is_some())
    }

    /// Period found so far
    pub const fn period(&self) -> Option<usize> {
        self.period
    }

    /// Divergence record so far
    pub const fn divergence(&self) -> Option<Divergence> {
        self.divergence.best()
    }

    /// Whether further steps would produce nothing
    pub const fn is_finished(&self) -> bool {
        self.period.is_some() || self.iteration() >= self.max_iterations
    }

    /// Produce the next iterate
    ///
    /// # Errors
    ///
    /// Propagates engine errors; the inputs were validated in
    /// [`OrbitTracker::new`], so this only fails on an engine defect.
    pub fn step(&mut self) -> Result<Step> {
        if self.is_finished() {
            return Ok(Step::Finished);
        }

        let (Some(original), Some(previous)) = (self.iterates.first(), self.iterates.last()) else {
            return Ok(Step::Finished);
        };

        let (next, identical) = match self.strategy {
            DetectionStrategy::PixelEquality => transform_and_compare(previous, original)?,
            DetectionStrategy::ScoreBased => (transform(previous)?, false),
        };
        let score = dissimilarity(&next, original)?;

        self.iteration += 1;
        let index = self.iteration;
        if self.divergence.observe(index, score) && self.retention == Retention::Endpoints {
            self.diverged = Some(next.clone());
        }

        if self.retention == Retention::Endpoints {
            self.iterates.truncate(1);
        }
        self.iterates.push(next);

        let recurred = match self.strategy {
            DetectionStrategy::PixelEquality => identical,
            DetectionStrategy::ScoreBased => score == 0,
        };

        if recurred {
            self.period = Some(index);
            Ok(Step::Recurred { period: index })
        } else {
            Ok(Step::Advanced { index, score })
        }
    }

    /// Consume the tracker and return the orbit gathered so far
    pub fn finish(mut self) -> OrbitResult<T> {
        let latest = if self.retention == Retention::Endpoints && self.iterates.len() > 1 {
            self.iterates.pop()
        } else {
            None
        };

        OrbitResult {
            iterates: self.iterates,
            period: self.period,
            divergence: self.divergence.best(),
            iterations: self.iteration,
            latest,
            diverged: self.diverged,
        }
    }
}

/// Run the orbit with the canonical score-based recurrence test
///
/// # Errors
///
/// Returns an error if the bound is zero or the original fails validation.
pub fn run<T: Channel>(original: PixelBuffer<T>, max_iterations: usize) -> Result<OrbitResult<T>> {
    run_with_strategy(original, max_iterations, DetectionStrategy::ScoreBased)
}

/// Run the orbit until recurrence or until `max_iterations` iterates exist
///
/// # Errors
///
/// Returns an error if the bound is zero or the original fails validation.
pub fn run_with_strategy<T: Channel>(
    original: PixelBuffer<T>,
    max_iterations: usize,
    strategy: DetectionStrategy,
) -> Result<OrbitResult<T>> {
    let mut tracker = OrbitTracker::new(original, max_iterations, strategy)?;
    while tracker.step()? != Step::Finished {}
    Ok(tracker.finish())
}
