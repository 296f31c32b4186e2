//! Per-file iteration progress with a rolling window of bars

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

static ITERATION_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:30.cyan/blue}] {prefix}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Images: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Display state of one input file
#[derive(Debug, Clone, Default)]
struct FileState {
    label: String,
    iteration: usize,
    max_iterations: usize,
}

/// Coordinates progress display while orbits are computed
///
/// Shows one bar per recent file; large batches also get a single bar
/// counting finished files.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    file_bars: Vec<ProgressBar>,
    files: Vec<FileState>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            file_bars: Vec::new(),
            files: Vec::new(),
        }
    }

    /// Create the bars needed for `file_count` inputs
    pub fn initialize(&mut self, file_count: usize) {
        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        for _ in 0..file_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let bar = ProgressBar::new(0);
            bar.set_style(ITERATION_STYLE.clone());
            self.file_bars.push(self.multi_progress.add(bar));
        }
    }

    /// Register the file at `index` with its iteration bound
    pub fn start_file(&mut self, index: usize, path: &Path, max_iterations: usize) {
        if index >= self.files.len() {
            self.files.resize_with(index + 1, FileState::default);
        }
        if let Some(state) = self.files.get_mut(index) {
            *state = FileState {
                label: path
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .to_string(),
                iteration: 0,
                max_iterations,
            };
        }
        self.redraw();
    }

    /// Report that the file at `index` has produced `iteration` iterates
    pub fn update_iteration(&mut self, index: usize, iteration: usize) {
        if let Some(state) = self.files.get_mut(index) {
            state.iteration = iteration;
        }
        self.redraw();
    }

    /// Mark the file at `index` as done, noting the period when one was found
    pub fn complete_file(&mut self, index: usize, period: Option<usize>) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }

        if let Some(state) = self.files.get_mut(index) {
            state.label = match period {
                Some(period) => format!("✓ {} (period {period})", state.label),
                None => format!("· {}", state.label),
            };
            // A recurrence ends the run early; show it as a full bar
            state.max_iterations = state.iteration.max(1);
            state.iteration = state.max_iterations;
        }
        self.redraw();
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All images processed");
        }
        let _ = self.multi_progress.clear();
    }

    /// Number of files registered so far
    pub const fn file_count(&self) -> usize {
        self.files.len()
    }

    fn redraw(&self) {
        let active: Vec<&FileState> = self
            .files
            .iter()
            .filter(|state| !state.label.is_empty())
            .collect();
        let start = active.len().saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible = active.get(start..).unwrap_or(&[]);

        for (bar_index, bar) in self.file_bars.iter().enumerate() {
            if let Some(state) = visible.get(bar_index) {
                bar.set_length(state.max_iterations as u64);
                bar.set_position(state.iteration as u64);
                let digits = state.max_iterations.to_string().len();
                bar.set_message(format!(
                    "{:>digits$}/{}",
                    state.iteration, state.max_iterations
                ));
                bar.set_prefix(state.label.clone());
            } else {
                bar.set_length(0);
                bar.set_position(0);
                bar.set_message(String::new());
                bar.set_prefix(String::new());
            }
        }
    }
}
