//! Batch progress display with a rolling window of recent compositions

use crate::io::configuration::{MAX_INDIVIDUAL_PROGRESS_BARS, PROGRESS_BAR_WIDTH};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;
use std::time::Duration;

/// Stages a composition goes through, shown as the length of its bar
pub const STAGES: [&str; 3] = ["placing", "effects", "saving"];
/// Position of "effects" in [`STAGES`]
pub const EFFECTS_STAGE: usize = 1;
/// Position of "saving" in [`STAGES`]
pub const SAVING_STAGE: usize = 2;

static COMPOSITION_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix:>18} [{bar:20.cyan/blue}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "[{{elapsed_precise}}] Compositions: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}}"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

#[derive(Clone, Debug, Default)]
struct CompositionState {
    name: String,
    stage: usize,
    message: String,
}

/// Coordinates progress display for a batch of compositions
///
/// A batch bar counts finished compositions. Below it, up to
/// [`MAX_INDIVIDUAL_PROGRESS_BARS`] bars show the most recent compositions and
/// the stage each one has reached.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    bars: Vec<ProgressBar>,
    states: Vec<CompositionState>,
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
            bars: Vec::new(),
            states: Vec::new(),
        }
    }

    /// Create the bars for a batch of `count` compositions
    pub fn initialize(&mut self, count: usize) {
        let batch_bar = ProgressBar::new(count as u64);
        batch_bar.set_style(BATCH_STYLE.clone());
        self.batch_bar = Some(self.multi_progress.add(batch_bar));

        for _ in 0..count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let bar = ProgressBar::new(STAGES.len() as u64);
            bar.set_style(COMPOSITION_STYLE.clone());
            self.bars.push(self.multi_progress.add(bar));
        }
    }

    /// Register composition `index` under a display name
    pub fn start(&mut self, index: usize, name: &str) {
        if index >= self.states.len() {
            self.states.resize(index + 1, CompositionState::default());
        }
        if let Some(state) = self.states.get_mut(index) {
            *state = CompositionState {
                name: name.to_string(),
                stage: 0,
                message: STAGES.first().copied().unwrap_or_default().to_string(),
            };
        }
        self.update_bars();
    }

    /// Move composition `index` to the stage at position `stage` in [`STAGES`]
    pub fn advance(&mut self, index: usize, stage: usize) {
        if let Some(state) = self.states.get_mut(index) {
            state.stage = stage.min(STAGES.len());
            state.message = STAGES.get(stage).copied().unwrap_or_default().to_string();
        }
        self.update_bars();
    }

    /// Mark composition `index` done with a short summary
    pub fn complete(&mut self, index: usize, summary: &str, elapsed: Duration) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
        if let Some(state) = self.states.get_mut(index) {
            state.name = format!("✓ {}", state.name);
            state.stage = STAGES.len();
            state.message = format!("{summary} ({:.1}s)", elapsed.as_secs_f64());
        }
        self.update_bars();
    }

    /// Stage label composition `index` currently shows
    pub fn stage_label(&self, index: usize) -> Option<&str> {
        self.states
            .get(index)
            .filter(|state| !state.name.is_empty())
            .map(|state| state.message.as_str())
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All compositions saved");
        }
        let _ = self.multi_progress.clear();
    }

    /// Show the last N started compositions on the individual bars
    fn update_bars(&self) {
        let active: Vec<&CompositionState> =
            self.states.iter().filter(|s| !s.name.is_empty()).collect();
        let start = active.len().saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible = active.get(start..).unwrap_or(&[]);

        for (bar_index, bar) in self.bars.iter().enumerate() {
            match visible.get(bar_index) {
                Some(state) => {
                    bar.set_position(state.stage as u64);
                    bar.set_prefix(state.name.clone());
                    bar.set_message(state.message.clone());
                }
                None => {
                    bar.set_position(0);
                    bar.set_prefix(String::new());
                    bar.set_message(String::new());
                }
            }
        }
    }
}
