//! Front-end constants and runtime configuration defaults

/// Default upper bound on transforms applied to one image
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

/// File extensions accepted as inputs
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];

// Output naming; inputs whose stem carries one of these suffixes are skipped
/// Suffix of the most diverged iterate
pub const DIVERGED_SUFFIX: &str = "_diverged";
/// Suffix of the last iterate produced
pub const FINAL_SUFFIX: &str = "_final";
/// Suffix of the orbit animation and of the per-iterate frame directory
pub const ORBIT_SUFFIX: &str = "_orbit";

// Animation settings
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 120;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 20;
/// Longest animation written; longer orbits are sampled evenly
pub const MAX_GIF_FRAMES: usize = 240;
/// How many frame delays the final frame is held for
pub const FINAL_FRAME_HOLD: u32 = 10;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
