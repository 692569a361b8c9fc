//! Terminal progress for batch stippling, one bar per image being relaxed

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

/// Display state of one image in the rolling window
#[derive(Debug, Clone, Default)]
struct FileState {
    name: String,
    iteration: usize,
    iterations: usize,
    detail: String,
}

/// Coordinates progress display for batch operations
///
/// Large batches get an extra bar counting finished files; the per-image bars
/// always show the most recent `MAX_INDIVIDUAL_PROGRESS_BARS` images.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    file_bars: Vec<ProgressBar>,
    file_states: Vec<FileState>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

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

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            file_bars: Vec::new(),
            file_states: Vec::new(),
        }
    }

    /// Create bars for a batch of `file_count` images
    pub fn initialize(&mut self, file_count: usize) {
        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        for _ in 0..file_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let pb = ProgressBar::new(0);
            pb.set_style(ITERATION_STYLE.clone());
            self.file_bars.push(self.multi_progress.add(pb));
        }
    }

    /// Begin tracking an image that will run `iterations` Lloyd steps
    pub fn start_file(&mut self, index: usize, path: &Path, iterations: usize) {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        if index >= self.file_states.len() {
            self.file_states.resize(index + 1, FileState::default());
        }
        if let Some(state) = self.file_states.get_mut(index) {
            *state = FileState {
                name,
                iteration: 0,
                iterations,
                detail: String::new(),
            };
        }
        self.update_bars();
    }

    /// Report a completed iteration and the mean point displacement it caused
    pub fn update_iteration(&mut self, index: usize, iteration: usize, mean_displacement: f64) {
        if let Some(state) = self.file_states.get_mut(index) {
            state.iteration = iteration;
            state.detail = format!("Δ {mean_displacement:.3}px");
        }
        self.update_bars();
    }

    /// Mark an image as finished
    pub fn complete_file(&mut self, index: usize, elapsed: Duration) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }

        if let Some(state) = self.file_states.get_mut(index) {
            state.name = format!("✓ {}", state.name);
            state.iteration = state.iterations;
            state.detail = format!("{:.1}s", elapsed.as_secs_f64());
        }
        self.update_bars();
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All images processed");
        }
        let _ = self.multi_progress.clear();
    }

    fn update_bars(&self) {
        let active: Vec<&FileState> = self
            .file_states
            .iter()
            .filter(|state| !state.name.is_empty())
            .collect();
        let start = active.len().saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible = active.get(start..).unwrap_or(&[]);

        for (bar_idx, bar) in self.file_bars.iter().enumerate() {
            match visible.get(bar_idx) {
                Some(state) => {
                    bar.set_length(state.iterations as u64);
                    bar.set_position(state.iteration as u64);
                    let max_width = state.iterations.to_string().len();
                    bar.set_message(format!(
                        "{:>max_width$}/{} {}",
                        state.iteration, state.iterations, state.detail
                    ));
                    bar.set_prefix(state.name.clone());
                }
                None => {
                    bar.set_length(0);
                    bar.set_position(0);
                    bar.set_message(String::new());
                    bar.set_prefix(String::new());
                }
            }
        }
    }
}
