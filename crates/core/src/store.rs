//! Application store
//!
//! Session-wide state (task list, current task, stats, settings and the
//! latest timer snapshot) behind a watch channel. Only services in this crate
//! write to it; everything else reads a snapshot or subscribes.

use tokio::sync::watch;
use trak_domain::{Settings, Stats, Task, TaskId, TimerSnapshot};

/// Everything the views render
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// Today's tasks, newest first as the backend orders them
    pub tasks: Vec<Task>,
    pub current_task: Option<Task>,
    pub stats: Stats,
    pub settings: Settings,
    pub timer: TimerSnapshot,
}

/// Single-writer state container
#[derive(Debug)]
pub struct AppStore {
    tx: watch::Sender<AppState>,
}

impl Default for AppStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AppStore {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(AppState::default());
        Self { tx }
    }

    /// Clone of the current state
    pub fn snapshot(&self) -> AppState {
        self.tx.borrow().clone()
    }

    /// Receive a notification on every change
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.tx.subscribe()
    }

    pub fn current_task(&self) -> Option<Task> {
        self.tx.borrow().current_task.clone()
    }

    pub fn current_task_id(&self) -> Option<TaskId> {
        self.tx.borrow().current_task.as_ref().map(|t| t.id)
    }

    pub fn settings(&self) -> Settings {
        self.tx.borrow().settings.clone()
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.tx.borrow().tasks.clone()
    }

    pub fn stats(&self) -> Stats {
        self.tx.borrow().stats.clone()
    }

    /* ---------------------------------------------------------------------- */
    /* Writers (crate-private) */
    /* ---------------------------------------------------------------------- */

    pub(crate) fn set_tasks(&self, tasks: Vec<Task>) {
        self.tx.send_modify(|state| state.tasks = tasks);
    }

    pub(crate) fn set_stats(&self, stats: Stats) {
        self.tx.send_modify(|state| state.stats = stats);
    }

    pub(crate) fn set_settings(&self, settings: Settings) {
        self.tx.send_modify(|state| state.settings = settings);
    }

    pub(crate) fn set_timer(&self, timer: TimerSnapshot) {
        self.tx.send_if_modified(|state| {
            let changed = state.timer != timer;
            state.timer = timer;
            changed
        });
    }

    pub(crate) fn set_current_task(&self, task: Option<Task>, timer: TimerSnapshot) {
        self.tx.send_modify(|state| {
            state.current_task = task;
            state.timer = timer;
        });
    }

    /// Replace the current task copy if it has the same id
    pub(crate) fn replace_current_if_same(&self, task: &Task) -> bool {
        self.tx.send_if_modified(|state| match &mut state.current_task {
            Some(current) if current.id == task.id => {
                *current = task.clone();
                true
            }
            _ => false,
        })
    }

    /// Clear the current task if it has the given id
    pub(crate) fn clear_current_if(&self, id: TaskId, timer: TimerSnapshot) -> bool {
        self.tx.send_if_modified(|state| {
            if state.current_task.as_ref().map(|t| t.id) == Some(id) {
                state.current_task = None;
                state.timer = timer;
                true
            } else {
                false
            }
        })
    }
}
