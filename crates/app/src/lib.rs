//! # TRAK App
//!
//! Interactive shell for the TRAK time tracker.
//!
//! This crate contains:
//! - Command-line arguments and the line-oriented shell
//! - Application context (dependency injection)
//! - Console notifier and headless window bridge
//!
//! ## Architecture
//! - Depends on `common`, `domain`, `core`, and `infra`
//! - Wires the REST adapters into the core services
//! - Owns all terminal I/O; logs go to stderr, output to stdout

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod console;
pub mod context;
pub mod shell;
pub mod utils;

// Re-export for convenience
pub use cli::Cli;
pub use commands::Command;
pub use console::Console;
pub use context::{AppContext, Ports};
