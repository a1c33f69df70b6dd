//! Conversions from third-party errors into `TrakError`.

pub mod conversions;

pub use conversions::InfraError;
