//! Checked/matched counters and rate-limited progress logging.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Counters shared between the coordinating thread and the workers.
#[derive(Debug, Default)]
pub struct Counters {
    checked: AtomicU64,
    matched: AtomicU64,
}

impl Counters {
    pub fn add_checked(&self) {
        self.checked.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_matched(&self) {
        self.matched.fetch_add(1, Ordering::Relaxed);
    }

    /// Candidate seeds fully evaluated.
    pub fn checked(&self) -> u64 {
        self.checked.load(Ordering::Relaxed)
    }

    /// Matches written to the sink.
    pub fn matched(&self) -> u64 {
        self.matched.load(Ordering::Relaxed)
    }
}

/// Logs a progress line at most once per interval. An interval too large
/// to add to the current instant never reports.
#[derive(Debug)]
pub struct ProgressReporter {
    interval: Duration,
    started: Instant,
    next_report: Option<Instant>,
}

impl ProgressReporter {
    pub fn new(interval: Duration) -> Self {
        let now = Instant::now();
        Self {
            interval,
            started: now,
            next_report: now.checked_add(interval),
        }
    }

    /// Log the counters if the interval has elapsed. Returns whether a line
    /// was logged.
    pub fn tick(&mut self, counters: &Counters) -> bool {
        let now = Instant::now();
        if self.next_report.is_none_or(|next| now < next) {
            return false;
        }
        self.next_report = now.checked_add(self.interval);
        let (checked, matched) = (counters.checked(), counters.matched());
        let rate = checked as f64 / self.elapsed().as_secs_f64().max(f64::EPSILON);
        tracing::info!(checked, matched, "{checked} seeds checked with {matched} matches ({rate:.0}/s)");
        true
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Log the final totals.
    pub fn finish(&self, counters: &Counters) {
        let (checked, matched) = (counters.checked(), counters.matched());
        tracing::info!(
            checked,
            matched,
            elapsed_secs = self.elapsed().as_secs_f64(),
            "Finished: {checked} seeds checked with {matched} matches"
        );
    }
}
