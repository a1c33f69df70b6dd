//! REST adapters for the TRAK backend
//!
//! One adapter per core port, all sharing a single [`ApiClient`]:
//!
//! - [`RestTaskApi`] implements `TaskApi` over `/tasks`
//! - [`RestSettingsApi`] implements `SettingsApi` over `/settings`
//! - [`RestAiApi`] implements `AiApi` over `/ai`, decoding the chat stream
//!   with [`sse`]
//!
//! # Errors
//!
//! Transport and status failures are classified as [`ApiError`] and become
//! `TrakError` when they cross the port boundary. Nothing here retries a
//! mutation.

pub mod ai;
pub mod client;
pub mod errors;
pub mod settings;
pub mod sse;
pub mod tasks;

pub use ai::RestAiApi;
pub use client::{ApiClient, ApiClientBuilder, ApiClientConfig};
pub use errors::{ApiError, ApiErrorCategory};
pub use settings::RestSettingsApi;
pub use tasks::RestTaskApi;
