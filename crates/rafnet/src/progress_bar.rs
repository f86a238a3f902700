use std::time::{Duration, Instant};
use indicatif::{ProgressBar, ProgressStyle};
use log::warn;

use raf_algorithms::{Canceled, Progress};

/// Shows algorithm progress on stderr and cancels once a time limit has
/// passed.
pub struct ProgressReporter {
    bar: ProgressBar,
    deadline: Option<Instant>,
}

impl ProgressReporter {
    pub fn new(time_limit: Option<Duration>) -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::with_template("{spinner:.green} {prefix:.bold} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Self {
            bar,
            deadline: time_limit.map(|t| Instant::now() + t),
        }
    }

    /// No output, but still honors the time limit.
    pub fn hidden(time_limit: Option<Duration>) -> Self {
        Self {
            bar: ProgressBar::hidden(),
            deadline: time_limit.map(|t| Instant::now() + t),
        }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Progress for ProgressReporter {
    fn set_tasks(&self, title: &str, subtitle: &str) {
        self.bar.set_prefix(title.to_string());
        self.bar.set_message(subtitle.to_string());
    }

    fn set_subtask(&self, text: &str) {
        self.bar.set_message(text.to_string());
    }

    fn set_maximum(&self, n: u64) {
        self.bar.set_length(n);
    }

    fn set_progress(&self, n: u64) {
        self.bar.set_position(n);
    }

    fn increment_progress(&self) {
        self.bar.inc(1);
    }

    fn check_for_cancel(&self) -> Result<(), Canceled> {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => {
                if !self.bar.is_finished() {
                    warn!("Time limit reached");
                    self.bar.abandon_with_message("time limit reached");
                }
                Err(Canceled)
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deadline_cancels() {
        let p = ProgressReporter::hidden(None);
        assert_eq!(p.check_for_cancel(), Ok(()));
        let p = ProgressReporter::hidden(Some(Duration::ZERO));
        assert_eq!(p.check_for_cancel(), Err(Canceled));
    }
}
