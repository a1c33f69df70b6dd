//! Domain utilities

pub mod timestamp;
