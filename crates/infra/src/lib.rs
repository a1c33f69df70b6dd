//! # TRAK Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - The HTTP client and the REST adapters for the TRAK backend
//! - The server-sent event decoder used by the chat assistant
//! - Configuration loading from files and environment
//!
//! ## Architecture
//! - Implements traits defined in `trak-core`
//! - Contains all "impure" code (network, filesystem, environment)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;

// Re-export commonly used items
pub use api::{ApiClient, ApiError, RestAiApi, RestSettingsApi, RestTaskApi};
pub use errors::InfraError;
pub use http::HttpClient;
