//! Common utilities shared across TRAK crates.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `foundation`: error classification, clock abstraction, duration formatting
//! - `runtime`: cancellable recurring timers (requires tokio)

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Foundation tier
// -----------------------------------------------------------------
#[cfg(feature = "foundation")]
pub mod error;
#[cfg(feature = "foundation")]
pub mod time;

// Re-export commonly used types and traits for convenience
// ------------------------
#[cfg(feature = "foundation")]
pub use error::{ErrorClassification, ErrorSeverity};
#[cfg(feature = "foundation")]
pub use time::clock::{Clock, MockClock, SystemClock};
#[cfg(feature = "foundation")]
pub use time::format::{format_clock, format_minutes};
#[cfg(feature = "runtime")]
pub use time::timer::{recurring, TimerHandle};
