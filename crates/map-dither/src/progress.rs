//! Progress reporting hooks.

use std::sync::atomic::{AtomicU64, Ordering};

/// Receives coarse progress updates: a range first, then increments.
///
/// Implementations must be `Sync` because the parallel matcher reports
/// from worker threads.
pub trait Progress: Sync {
    fn set_range(&self, min: u64, max: u64, current: u64);
    fn add(&self, delta: u64);
}

/// Discards every update.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn set_range(&self, _min: u64, _max: u64, _current: u64) {}
    fn add(&self, _delta: u64) {}
}

/// Accumulates updates in atomics; useful for polling from another thread.
#[derive(Debug, Default)]
pub struct AtomicProgress {
    max: AtomicU64,
    current: AtomicU64,
}

impl AtomicProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(current, max)` of the latest range.
    pub fn snapshot(&self) -> (u64, u64) {
        (
            self.current.load(Ordering::Relaxed),
            self.max.load(Ordering::Relaxed),
        )
    }
}

impl Progress for AtomicProgress {
    fn set_range(&self, _min: u64, max: u64, current: u64) {
        self.max.store(max, Ordering::Relaxed);
        self.current.store(current, Ordering::Relaxed);
    }

    fn add(&self, delta: u64) {
        self.current.fetch_add(delta, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atomic_progress_tracks_range() {
        let p = AtomicProgress::new();
        p.set_range(0, 10, 2);
        p.add(3);
        assert_eq!(p.snapshot(), (5, 10));
        p.set_range(0, 4, 0);
        assert_eq!(p.snapshot(), (0, 4));
    }
}
