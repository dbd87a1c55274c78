use std::sync::atomic::{AtomicU64, Ordering};

/// Hardware watchdog collaborator. `checkpoint()` is the liveness reset:
/// the orchestrator calls it before and after every source fetch so no
/// stretch of a batch runs longer than MAX_CHECKPOINT_GAP_MS without one.
pub trait Watchdog: Send + Sync {
    fn checkpoint(&self);
}

/// For hosted runs with no hardware watchdog.
#[derive(Debug, Default)]
pub struct NoopWatchdog;

impl Watchdog for NoopWatchdog {
    fn checkpoint(&self) {}
}

/// Counts checkpoints; used by tests to verify liveness-reset placement.
#[derive(Debug, Default)]
pub struct CountingWatchdog {
    count: AtomicU64,
}

impl CountingWatchdog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}

impl Watchdog for CountingWatchdog {
    fn checkpoint(&self) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }
}
