//! Progress and status sinks for a session.

use crate::error::SessionError;
use crate::models::WorkStatus;
use map_dither::{AtomicProgress, Progress};

/// Receives everything a session wants to tell its user while it works.
///
/// All methods default to doing nothing. Progress calls may arrive from
/// worker threads during parallel matching.
pub trait Reporter: Send + Sync {
    fn set_range(&self, _min: u64, _max: u64, _current: u64) {}

    fn add(&self, _delta: u64) {}

    fn working_status(&self, _status: WorkStatus) {}

    fn report_error(&self, _error: &SessionError) {}
}

/// Reporter that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl Reporter for SilentReporter {}

/// Reporter that writes status changes and errors to the tracing log.
#[derive(Debug, Default)]
pub struct LogReporter {
    progress: AtomicProgress,
}

impl LogReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(current, max)` of the running operation.
    pub fn progress(&self) -> (u64, u64) {
        self.progress.snapshot()
    }
}

impl Reporter for LogReporter {
    fn set_range(&self, min: u64, max: u64, current: u64) {
        self.progress.set_range(min, max, current);
    }

    fn add(&self, delta: u64) {
        self.progress.add(delta);
    }

    fn working_status(&self, status: WorkStatus) {
        let (current, max) = self.progress.snapshot();
        tracing::debug!(?status, current, max, "Working status");
    }

    fn report_error(&self, error: &SessionError) {
        tracing::warn!(%error, "Session operation failed");
    }
}

/// Lets a reporter stand in where the kernel expects a [`Progress`].
pub(crate) struct ProgressAdapter<'a>(pub &'a dyn Reporter);

impl Progress for ProgressAdapter<'_> {
    fn set_range(&self, min: u64, max: u64, current: u64) {
        self.0.set_range(min, max, current);
    }

    fn add(&self, delta: u64) {
        self.0.add(delta);
    }
}
