//! User settings
//!
//! Settings live on the backend. The service caches the typed view in the
//! store so other services can read it without a round trip.

pub mod ports;
pub mod service;

pub use ports::SettingsApi;
pub use service::SettingsService;
