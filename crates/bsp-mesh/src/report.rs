//! Progress and diagnostic reporting.
//!
//! The pipeline never touches global logging state. Everything it has to say
//! goes through a [`Reporter`] handed in by the caller.

/// Importance of a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
}

/// Receiver for progress updates and diagnostics.
///
/// Calls are made inline on the converting thread, so implementations should
/// return quickly.
pub trait Reporter {
    /// `processed` of `total` faces have been handled.
    fn progress(&mut self, processed: usize, total: usize) {
        let _ = (processed, total);
    }

    /// A human-readable diagnostic.
    fn message(&mut self, severity: Severity, message: &str);
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn progress(&mut self, processed: usize, total: usize) {
        (**self).progress(processed, total);
    }

    fn message(&mut self, severity: Severity, message: &str) {
        (**self).message(severity, message);
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn message(&mut self, _severity: Severity, _message: &str) {}
}

/// Forwards messages to `tracing` and progress to `trace!` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn progress(&mut self, processed: usize, total: usize) {
        tracing::trace!(processed, total, "face progress");
    }

    fn message(&mut self, severity: Severity, message: &str) {
        match severity {
            Severity::Debug => tracing::debug!("{message}"),
            Severity::Info => tracing::info!("{message}"),
            Severity::Warning => tracing::warn!("{message}"),
            Severity::Error => tracing::error!("{message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counting {
        messages: usize,
        last_progress: Option<(usize, usize)>,
    }

    impl Reporter for Counting {
        fn progress(&mut self, processed: usize, total: usize) {
            self.last_progress = Some((processed, total));
        }

        fn message(&mut self, _severity: Severity, _message: &str) {
            self.messages += 1;
        }
    }

    fn report_twice<R: Reporter>(mut reporter: R) {
        reporter.message(Severity::Info, "one");
        reporter.progress(1, 2);
        reporter.message(Severity::Warning, "two");
    }

    #[test]
    fn mutable_reference_forwards() {
        let mut counting = Counting::default();
        report_twice(&mut counting);
        assert_eq!(counting.messages, 2);
        assert_eq!(counting.last_progress, Some((1, 2)));
    }

    #[test]
    fn severity_ordering() {
        assert!(Severity::Debug < Severity::Info);
        assert!(Severity::Warning < Severity::Error);
    }

    #[test]
    fn tracing_reporter_without_subscriber() {
        report_twice(TracingReporter);
        report_twice(NullReporter);
    }
}
