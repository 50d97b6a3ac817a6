use crate::ports::outbound::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::sync::{Mutex, MutexGuard};

const BAR_TEMPLATE: &str =
    "   {spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) - {msg}";

/// StderrProgressReporter adapter for reporting progress to stderr
///
/// This adapter implements the ProgressReporter port, writing progress
/// information to stderr so it doesn't interfere with a report printed on
/// stdout. Uses indicatif for the progress bar and colours warnings when
/// stderr is a terminal. The bar sits behind a mutex so the reporter can be
/// shared with the background vessel poller.
pub struct StderrProgressReporter {
    progress_bar: Mutex<Option<ProgressBar>>,
    colored: bool,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self {
            progress_bar: Mutex::new(None),
            colored: std::io::stderr().is_terminal(),
        }
    }

    fn lock_bar(&self) -> MutexGuard<'_, Option<ProgressBar>> {
        self.progress_bar
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn get_or_create_progress_bar(&self, total: usize) -> ProgressBar {
        let mut slot = self.lock_bar();
        if let Some(pb) = slot.as_ref() {
            return pb.clone();
        }

        let pb = ProgressBar::new(total as u64);
        // A bad template only costs the styling; keep the default bar then.
        if let Ok(style) = ProgressStyle::default_bar().template(BAR_TEMPLATE) {
            pb.set_style(style.progress_chars("=>-"));
        }
        *slot = Some(pb.clone());
        pb
    }

    fn finish_progress_bar(&self) {
        if let Some(pb) = self.lock_bar().take() {
            pb.finish_and_clear();
        }
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        eprintln!("{}", message);
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        let pb = self.get_or_create_progress_bar(total);
        pb.set_position(current as u64);
        if let Some(msg) = message {
            pb.set_message(msg.to_string());
        }
    }

    fn report_error(&self, message: &str) {
        self.finish_progress_bar();
        if self.colored {
            eprintln!("{}", message.yellow());
        } else {
            eprintln!("{}", message);
        }
    }

    fn report_completion(&self, message: &str) {
        self.finish_progress_bar();
        eprintln!();
        if self.colored {
            eprintln!("{}", message.green());
        } else {
            eprintln!("{}", message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_reporter_creation() {
        let reporter = StderrProgressReporter::new();
        // Can't easily test stderr output, but verify it doesn't panic
        reporter.report("Test message");
        reporter.report_progress(5, 10, Some("test"));
        reporter.report_error("Test error");
        reporter.report_completion("Test completion");
    }

    #[test]
    fn test_error_clears_progress_bar() {
        let reporter = StderrProgressReporter::default();
        reporter.report_progress(1, 3, None);
        assert!(reporter.lock_bar().is_some());

        reporter.report_error("⚠️  Warning: test");
        assert!(reporter.lock_bar().is_none());
    }

    #[test]
    fn test_reporter_shared_across_threads() {
        let reporter = std::sync::Arc::new(StderrProgressReporter::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let reporter = reporter.clone();
                std::thread::spawn(move || reporter.report_progress(i, 4, None))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert!(reporter.lock_bar().is_some());
    }
}
