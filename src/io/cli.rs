//! Command-line interface for computing cat map orbits of image files

use crate::engine::PixelBuffer;
use crate::io::configuration::{
    DEFAULT_MAX_ITERATIONS, DIVERGED_SUFFIX, FINAL_SUFFIX, GIF_FRAME_DELAY_MS, MAX_GIF_FRAMES,
    ORBIT_SUFFIX, SUPPORTED_EXTENSIONS,
};
use crate::io::error::{OrbitError, Result, invalid_parameter};
use crate::io::image::{export_png, load_pixel_buffer};
use crate::io::progress::ProgressManager;
use crate::io::visualization::OrbitAnimation;
use crate::orbit::divergence::Divergence;
use crate::orbit::tracker::{DetectionStrategy, OrbitResult, OrbitTracker, Retention, Step};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

/// Recurrence test as spelled on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Compare pixels with the original during each pass
    Pixel,
    /// Stop when the L1 score against the original reaches zero
    Score,
}

impl From<StrategyArg> for DetectionStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Pixel => Self::PixelEquality,
            StrategyArg::Score => Self::ScoreBased,
        }
    }
}

#[derive(Parser)]
#[command(name = "catorbit")]
#[command(
    author,
    version,
    about = "Apply the cat map to square images until they return to their original state"
)]
/// Command-line arguments for the orbit tool
// Output selection is naturally a set of independent switches
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input image or directory of images to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Maximum number of transforms applied to each image
    #[arg(short, long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    pub iterations: usize,

    /// How a return to the original image is detected
    #[arg(short, long, value_enum, default_value_t = StrategyArg::Score)]
    pub strategy: StrategyArg,

    /// Write the orbit as an animated GIF
    #[arg(short, long)]
    pub gif: bool,

    /// Write every iterate as a numbered PNG
    #[arg(short, long)]
    pub all: bool,

    /// Suppress progress and status output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Recurrence test selected by `--strategy`
    pub fn detection_strategy(&self) -> DetectionStrategy {
        self.strategy.into()
    }

    /// Whole orbits are only kept when an output needs every iterate
    pub const fn retention(&self) -> Retention {
        if self.gif || self.all {
            Retention::Full
        } else {
            Retention::Endpoints
        }
    }
}

/// Input that was passed over, and why
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedInput {
    /// File that was not processed
    pub input: PathBuf,
    /// Reason shown to the user
    pub reason: String,
}

/// What one processed image produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrbitSummary {
    /// Image that was processed
    pub input: PathBuf,
    /// Image width in pixels
    pub width: usize,
    /// Image height in pixels
    pub height: usize,
    /// Transforms applied
    pub iterations: usize,
    /// Bound that was requested
    pub max_iterations: usize,
    /// Iterate at which the original reappeared
    pub period: Option<usize>,
    /// Iterate farthest from the original
    pub divergence: Option<Divergence>,
}

impl OrbitSummary {
    /// Summarise a finished run of `input`
    pub fn new<T: crate::engine::buffer::Channel>(
        input: &Path,
        result: &OrbitResult<T>,
        max_iterations: usize,
    ) -> Self {
        let (width, height) = result
            .original()
            .map_or((0, 0), PixelBuffer::dimensions);

        Self {
            input: input.to_path_buf(),
            width,
            height,
            iterations: result.iterations(),
            max_iterations,
            period: result.period,
            divergence: result.divergence,
        }
    }

    /// One-line status in the form shown after each image
    pub fn status_line(&self) -> String {
        let name = self
            .input
            .file_name()
            .unwrap_or_default()
            .to_string_lossy();
        let period = self.period.map_or_else(
            || format!("no recurrence within {} iterations", self.max_iterations),
            |period| format!("period {period}"),
        );
        let divergence = self.divergence.map_or_else(
            || "none".to_string(),
            |d| format!("#{} (score {})", d.index, d.score),
        );

        format!(
            "Image: {name} | Size: {}x{} | Iteration: {}/{} | {period} | Max divergence: {divergence}",
            self.width, self.height, self.iterations, self.max_iterations
        )
    }
}

/// Orchestrates batch processing of image files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
    skipped: Vec<SkippedInput>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
            skipped: Vec::new(),
        }
    }

    /// Inputs passed over so far, in the order they were reported
    pub const fn skipped(&self) -> &[SkippedInput] {
        self.skipped.as_slice()
    }

    /// Process files according to CLI arguments
    ///
    /// When a directory is processed, images whose shape cannot carry the
    /// cat map are reported and skipped; any other failure stops the batch.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The iteration bound is zero
    /// - The target is not a supported image or a directory
    /// - An image cannot be loaded, transformed or exported
    pub fn process(&mut self) -> Result<Vec<OrbitSummary>> {
        if self.cli.iterations == 0 {
            return Err(OrbitError::InvalidBound {
                max_iterations: self.cli.iterations,
            });
        }

        let files = self.collect_files()?;
        if files.is_empty() {
            return Ok(Vec::new());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        let batch = self.cli.target.is_dir();
        let mut summaries = Vec::with_capacity(files.len());
        for (index, file) in files.iter().enumerate() {
            match self.process_file(file, index) {
                Ok(summary) => {
                    self.report(&summary.status_line());
                    summaries.push(summary);
                }
                Err(error @ OrbitError::InvalidDimensions { .. }) if batch => {
                    self.skip(file, error.to_string());
                }
                Err(error) => return Err(error),
            }
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(summaries)
    }

    fn collect_files(&mut self) -> Result<Vec<PathBuf>> {
        let target = self.cli.target.clone();

        if target.is_file() {
            if !is_supported(&target) {
                return Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &format!("expected one of: {}", SUPPORTED_EXTENSIONS.join(", ")),
                ));
            }
            Ok(if self.should_process_file(&target) {
                vec![target]
            } else {
                vec![]
            })
        } else if target.is_dir() {
            let entries = std::fs::read_dir(&target).map_err(|e| OrbitError::FileSystem {
                path: target.clone(),
                operation: "read directory",
                source: e,
            })?;

            let mut files = Vec::new();
            for entry in entries {
                let path = entry
                    .map_err(|e| OrbitError::FileSystem {
                        path: target.clone(),
                        operation: "read directory entry",
                        source: e,
                    })?
                    .path();
                if !path.is_file() || !is_supported(&path) {
                    continue;
                }
                if is_own_output(&path) {
                    self.skip(&path, "named like an output of this tool".to_string());
                } else if self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &"must be an image file or a directory",
            ))
        }
    }

    fn should_process_file(&mut self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        if output_path(input_path, DIVERGED_SUFFIX, "png").exists() {
            self.skip(input_path, "output exists".to_string());
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<OrbitSummary> {
        let original = load_pixel_buffer(input_path)?;
        let mut tracker = OrbitTracker::with_retention(
            original,
            self.cli.iterations,
            self.cli.detection_strategy(),
            self.cli.retention(),
        )?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path, self.cli.iterations);
        }

        loop {
            let iteration = match tracker.step()? {
                Step::Finished => break,
                Step::Advanced { index: iteration, .. } => iteration,
                Step::Recurred { period } => period,
            };
            if let Some(ref mut pm) = self.progress_manager {
                pm.update_iteration(index, iteration);
            }
        }
        let result = tracker.finish();

        if let Some(diverged) = result.most_diverged() {
            export_png(diverged, &output_path(input_path, DIVERGED_SUFFIX, "png"))?;
        }
        if let Some(last) = result.last() {
            export_png(last, &output_path(input_path, FINAL_SUFFIX, "png"))?;
        }

        if self.cli.gif {
            OrbitAnimation::from_iterates(&result.iterates, MAX_GIF_FRAMES)?
                .export_gif(&output_path(input_path, ORBIT_SUFFIX, "gif"), GIF_FRAME_DELAY_MS)?;
        }

        if self.cli.all {
            let frames_dir = frames_directory(input_path);
            let digits = result.iterations().to_string().len().max(4);
            for (position, iterate) in result.iterates.iter().enumerate() {
                export_png(
                    iterate,
                    &frames_dir.join(format!("{position:0digits$}.png")),
                )?;
            }
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index, result.period);
        }

        Ok(OrbitSummary::new(input_path, &result, self.cli.iterations))
    }

    fn skip(&mut self, input: &Path, reason: String) {
        self.report(&format!("Skipping: {} ({reason})", input.display()));
        self.skipped.push(SkippedInput {
            input: input.to_path_buf(),
            reason,
        });
    }

    // Status lines are the tool's user-facing output
    #[allow(clippy::print_stderr)]
    fn report(&self, message: &str) {
        if !self.cli.quiet {
            eprintln!("{message}");
        }
    }
}

/// Whether `path` has one of the supported image extensions
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| supported.eq_ignore_ascii_case(ext))
        })
}

/// Whether `path` looks like a file this tool wrote
pub fn is_own_output(path: &Path) -> bool {
    path.file_stem()
        .map(|stem| stem.to_string_lossy())
        .is_some_and(|stem| {
            [DIVERGED_SUFFIX, FINAL_SUFFIX, ORBIT_SUFFIX]
                .iter()
                .any(|suffix| stem.ends_with(suffix))
        })
}

/// Sibling of `input_path` named `<stem><suffix>.<extension>`
pub fn output_path(input_path: &Path, suffix: &str, extension: &str) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let name = format!("{}{suffix}.{extension}", stem.to_string_lossy());

    if let Some(parent) = input_path.parent() {
        parent.join(name)
    } else {
        PathBuf::from(name)
    }
}

/// Directory holding one PNG per iterate, `<stem>_orbit`
pub fn frames_directory(input_path: &Path) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let name = format!("{}{ORBIT_SUFFIX}", stem.to_string_lossy());

    if let Some(parent) = input_path.parent() {
        parent.join(name)
    } else {
        PathBuf::from(name)
    }
}
