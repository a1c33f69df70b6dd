//! Task lifecycle
//!
//! This module provides the port for the backend's task endpoints and the
//! service that keeps the timer, the store and the server in agreement.

pub mod lifecycle;
pub mod ports;

pub use lifecycle::{LifecycleService, StopOutcome};
pub use ports::TaskApi;
