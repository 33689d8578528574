//! Reporter that remembers what it was told.

use std::sync::Mutex;

use mapforge::error::SessionError;
use mapforge::models::WorkStatus;
use mapforge::services::Reporter;

#[derive(Debug, Default)]
pub struct RecordingReporter {
    statuses: Mutex<Vec<WorkStatus>>,
    errors: Mutex<Vec<SessionError>>,
    progress: Mutex<(u64, u64)>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn statuses(&self) -> Vec<WorkStatus> {
        self.statuses.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<SessionError> {
        self.errors.lock().unwrap().clone()
    }

    /// `(current, max)`
    pub fn progress(&self) -> (u64, u64) {
        *self.progress.lock().unwrap()
    }

    pub fn clear(&self) {
        self.statuses.lock().unwrap().clear();
        self.errors.lock().unwrap().clear();
    }
}

impl Reporter for RecordingReporter {
    fn set_range(&self, _min: u64, max: u64, current: u64) {
        *self.progress.lock().unwrap() = (current, max);
    }

    fn add(&self, delta: u64) {
        self.progress.lock().unwrap().0 += delta;
    }

    fn working_status(&self, status: WorkStatus) {
        self.statuses.lock().unwrap().push(status);
    }

    fn report_error(&self, error: &SessionError) {
        self.errors.lock().unwrap().push(error.clone());
    }
}
