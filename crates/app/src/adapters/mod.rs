//! Host-side implementations of the core's outbound ports

pub mod notifier;
pub mod window;

pub use notifier::ConsoleNotifier;
pub use window::HeadlessWindow;
