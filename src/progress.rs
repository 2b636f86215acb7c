//! Progress reporting for dependency analysis
//!
//! The orchestrator reports `(completed, total)` after every dependency
//! through a plain callback. This module provides the two consumers the
//! binary and embedders use: an indicatif progress bar and a channel
//! forwarder.

use crate::error::ProgressError;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tokio::sync::mpsc;

/// Progress bar for the analysis run
pub struct Progress {
    /// Whether progress display is enabled (disabled in quiet/json mode)
    enabled: bool,
    /// Current progress bar
    bar: Option<ProgressBar>,
}

impl Progress {
    /// Create a new progress reporter
    pub fn new(enabled: bool) -> Self {
        Self { enabled, bar: None }
    }

    /// Create a disabled progress reporter
    pub fn disabled() -> Self {
        Self::new(false)
    }

    /// Start a progress bar for a known number of items
    pub fn start(&mut self, total: u64, message: &str) {
        if !self.enabled {
            return;
        }

        let bar = ProgressBar::new(total);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.cyan} {msg} [{bar:30.cyan/blue}] {pos}/{len} ({eta})")
        {
            bar.set_style(style.progress_chars("█▓▒░"));
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        self.bar = Some(bar);
    }

    /// Move the bar to `completed` out of `total`
    pub fn update(&self, completed: usize, total: usize) {
        if let Some(ref bar) = self.bar {
            bar.set_length(total as u64);
            bar.set_position(completed as u64);
        }
    }

    /// Current position, if a bar is active
    pub fn position(&self) -> Option<u64> {
        self.bar.as_ref().map(ProgressBar::position)
    }

    /// Update the message
    pub fn set_message(&self, message: &str) {
        if let Some(ref bar) = self.bar {
            bar.set_message(message.to_string());
        }
    }

    /// Finish and clear the current progress bar
    pub fn finish_and_clear(&mut self) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
        self.bar = None;
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new(true)
    }
}

/// One progress notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressEvent {
    pub completed: usize,
    pub total: usize,
}

/// Build a progress callback that forwards every notification to a channel.
///
/// A dropped receiver makes the callback fail, which aborts the analysis.
pub fn forward_to(
    sender: mpsc::UnboundedSender<ProgressEvent>,
) -> impl FnMut(usize, usize) -> Result<(), ProgressError> {
    move |completed, total| {
        sender
            .send(ProgressEvent { completed, total })
            .map_err(|_| ProgressError::from("progress receiver dropped"))
    }
}
