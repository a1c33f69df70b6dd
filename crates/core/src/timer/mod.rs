//! Timer state controller
//!
//! Owns the single [`TimerState`](trak_domain::TimerState) of the session.

pub mod controller;

pub use controller::{StoppedTimer, TimerController};
