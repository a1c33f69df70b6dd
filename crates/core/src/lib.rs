//! # TRAK Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The timer state controller and the application store
//! - Port/adapter interfaces (traits) for the REST backend, notifications
//!   and the host window
//! - Use cases: task lifecycle, settings, assistant, data transfer
//!
//! ## Architecture Principles
//! - Only depends on `trak-common` and `trak-domain`
//! - No HTTP or platform code
//! - All external dependencies via traits
//! - Time is read through an injected `Clock`

pub mod assistant;
pub mod display;
pub mod settings;
pub mod store;
pub mod tasks;
pub mod timer;
pub mod transfer;

// Infrastructure ports
pub mod notifier_ports;
pub mod window_ports;

// Re-export specific items to avoid ambiguity
pub use assistant::ports::{AiApi, ChatStream};
pub use assistant::AssistantService;
pub use display::DisplayRefresher;
pub use notifier_ports::{Notification, NotificationLevel, Notifier, NullNotifier};
pub use settings::ports::SettingsApi;
pub use settings::SettingsService;
pub use store::{AppState, AppStore};
pub use tasks::ports::TaskApi;
pub use tasks::{LifecycleService, StopOutcome};
pub use timer::{StoppedTimer, TimerController};
pub use transfer::{ImportReport, TransferService};
pub use window_ports::{close_action, CloseAction, WindowControls};
