//! Prerequisite progress bar.

use indicatif::{ProgressBar, ProgressStyle};

use super::ProgressHandle;

/// Bounded progress bar that advances once per passed check.
pub struct CheckProgress {
    bar: ProgressBar,
}

impl CheckProgress {
    /// Create a visible progress bar.
    pub fn new(title: &str, total: usize) -> Self {
        let bar = ProgressBar::new(total as u64);
        if let Ok(style) =
            ProgressStyle::default_bar().template("{msg:<28} [{bar:24.magenta}] {pos}/{len}")
        {
            bar.set_style(style.progress_chars("█▓░"));
        }
        bar.set_message(title.to_string());
        Self { bar }
    }

    /// Create a progress bar that tracks position without drawing.
    pub fn hidden(total: usize) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_length(total as u64);
        Self { bar }
    }
}

impl ProgressHandle for CheckProgress {
    fn set_title(&mut self, title: &str) {
        self.bar.set_message(title.to_string());
    }

    fn increment(&mut self) {
        self.bar.inc(1);
    }

    fn position(&self) -> usize {
        self.bar.position() as usize
    }

    fn finish(&mut self) {
        self.bar.finish();
    }
}
