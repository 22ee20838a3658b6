//! Terminal progress bar fed by the conversion pipeline.

use bsp_mesh::{Reporter, Severity, TracingReporter};
use indicatif::{ProgressBar, ProgressStyle};

/// Draws face progress and routes messages to `tracing` around the bar.
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    pub fn new(visible: bool) -> Self {
        let bar = if visible {
            ProgressBar::new(0)
        } else {
            ProgressBar::hidden()
        };
        bar.set_style(
            ProgressStyle::with_template("[{bar:40}] {percent:>3}% ({pos}/{len}) faces")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Self { bar }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Reporter for ProgressReporter {
    fn progress(&mut self, processed: usize, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_position(processed as u64);
    }

    fn message(&mut self, severity: Severity, message: &str) {
        self.bar
            .suspend(|| TracingReporter.message(severity, message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_bar_tracks_position() {
        let mut reporter = ProgressReporter::new(false);
        reporter.progress(3, 10);
        assert_eq!(reporter.bar.position(), 3);
        assert_eq!(reporter.bar.length(), Some(10));
        reporter.message(Severity::Info, "still quiet");
        reporter.finish();
    }
}
