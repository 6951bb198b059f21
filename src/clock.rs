/// Time source abstraction for the drop engine
///
/// Claim windows and wait-time spacing are evaluated against a `Clock` rather
/// than the ambient system time so that tests can drive phases
/// deterministically instead of sleeping through them.
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Source of the current unix timestamp in seconds
pub trait Clock: Send + Sync {
    fn now_secs(&self) -> u64;
}

/// Production clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_secs(&self) -> u64 {
        chrono::Utc::now().timestamp().max(0) as u64
    }
}

/// Manually driven clock, shared between the engine and the test harness
#[derive(Debug, Clone, Default)]
pub struct ManualClock(Arc<AtomicU64>);

impl ManualClock {
    /// Create a clock starting at the given unix timestamp
    pub fn new(start_secs: u64) -> Self {
        Self(Arc::new(AtomicU64::new(start_secs)))
    }

    /// Set the current timestamp
    pub fn set(&self, secs: u64) {
        self.0.store(secs, Ordering::SeqCst);
    }

    /// Advance the clock by the given number of seconds
    pub fn advance(&self, secs: u64) {
        self.0.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_secs(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}
