//! Clock abstraction for expiry checks.
//!
//! All protocol timestamps are unsigned Unix seconds. The engine reads
//! time through [`Clock`] so expiry boundaries are exact and testable;
//! production uses [`SystemClock`], tests use `ManualClock`.

use chrono::Utc;

/// Source of the current Unix time in seconds.
pub trait Clock {
    fn unix_now(&self) -> u64;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_now(&self) -> u64 {
        u64::try_from(Utc::now().timestamp()).unwrap_or(0)
    }
}

/// Manually advanced clock for tests. Clones share the same instant, so
/// a test can keep a handle while the engine owns another.
#[cfg(any(test, feature = "test-helpers"))]
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: std::sync::Arc<std::sync::atomic::AtomicU64>,
}

#[cfg(any(test, feature = "test-helpers"))]
impl ManualClock {
    #[must_use]
    pub fn new(now: u64) -> Self {
        Self {
            now: std::sync::Arc::new(std::sync::atomic::AtomicU64::new(now)),
        }
    }

    pub fn set(&self, now: u64) {
        self.now.store(now, std::sync::atomic::Ordering::SeqCst);
    }

    pub fn advance(&self, secs: u64) {
        self.now
            .fetch_add(secs, std::sync::atomic::Ordering::SeqCst);
    }
}

#[cfg(any(test, feature = "test-helpers"))]
impl Clock for ManualClock {
    fn unix_now(&self) -> u64 {
        self.now.load(std::sync::atomic::Ordering::SeqCst)
    }
}
