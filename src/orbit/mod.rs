//! Orbit tracking: recurrence detection and divergence bookkeeping

/// Pixel dissimilarity metric and first-maximum tracking
pub mod divergence;
/// Step-wise orbit driver and run results
pub mod tracker;

pub use tracker::{
    DetectionStrategy, OrbitResult, OrbitTracker, Retention, run, run_with_strategy,
};
