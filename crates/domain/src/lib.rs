//! # TRAK Domain
//!
//! Business domain types and models for the TRAK client.
//!
//! This crate contains:
//! - Task, timer, stats and settings types as exchanged with the backend
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants
//!
//! ## Architecture
//! - Depends only on `trak-common` (foundation tier)
//! - Pure domain models and data structures, no I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
