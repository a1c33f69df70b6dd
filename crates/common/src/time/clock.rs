//! Wall clock abstraction for testability
//!
//! The timer records epoch-millisecond timestamps and recomputes elapsed time
//! from them, so every component that needs "now" takes a [`Clock`].
//!
//! # Examples
//!
//! ```
//! use trak_common::time::clock::{Clock, MockClock};
//!
//! let clock = MockClock::at(1_000);
//! clock.advance_secs(5);
//! assert_eq!(clock.now_millis(), 6_000);
//! ```

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of wall-clock time in milliseconds since the UNIX epoch
pub trait Clock: Send + Sync {
    /// Current time in milliseconds since the UNIX epoch
    fn now_millis(&self) -> i64;
}

/// Real system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
            .unwrap_or_default()
    }
}

/// Manually driven clock for deterministic tests
///
/// Clones share the same underlying time, so a test can keep one handle and
/// hand another to the component under test.
#[derive(Debug, Clone, Default)]
pub struct MockClock {
    millis: Arc<AtomicI64>,
}

impl MockClock {
    /// Create a clock starting at the UNIX epoch
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock starting at the given epoch milliseconds
    pub fn at(millis: i64) -> Self {
        Self { millis: Arc::new(AtomicI64::new(millis)) }
    }

    /// Move the clock forward by `millis`
    pub fn advance(&self, millis: i64) {
        self.millis.fetch_add(millis, Ordering::SeqCst);
    }

    /// Move the clock forward by whole seconds
    pub fn advance_secs(&self, secs: i64) {
        self.advance(secs * 1000);
    }

    /// Set the absolute time
    pub fn set(&self, millis: i64) {
        self.millis.store(millis, Ordering::SeqCst);
    }
}

impl Clock for MockClock {
    fn now_millis(&self) -> i64 {
        self.millis.load(Ordering::SeqCst)
    }
}
