//! Domain types and models
//!
//! Shapes follow the backend's JSON; see each module for the wire details.

pub mod ai;
pub mod settings;
pub mod stats;
pub mod task;
pub mod timer;
pub mod transfer;

pub use ai::{
    AiStatus, CategoryRequest, CategoryResponse, ChatContext, ChatEvent, ChatFrame, ChatRequest,
    ContextStats, SummaryRequest, SummaryResponse, SummaryTask, TitleRequest, TitleResponse,
};
pub use settings::{SettingEntry, SettingKey, Settings, SettingsMap};
pub use stats::{PeriodStats, Stats};
pub use task::{NewTask, Task, TaskId, TaskPatch, TaskStatus};
pub use timer::{TimerPhase, TimerSnapshot, TimerState};
pub use transfer::{ExportBundle, ImportTask};
