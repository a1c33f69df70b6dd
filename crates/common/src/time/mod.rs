//! Time utilities
//!
//! - [`clock`]: injectable wall clock with a controllable mock for tests
//! - [`format`]: clock-face and minute-total formatting for display
//! - [`timer`]: cancellable recurring timers (runtime tier)

pub mod clock;
pub mod format;
#[cfg(feature = "runtime")]
pub mod timer;

pub use clock::{Clock, MockClock, SystemClock};
pub use format::{format_clock, format_minutes};
#[cfg(feature = "runtime")]
pub use timer::{recurring, TimerHandle};
