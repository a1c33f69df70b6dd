//! Task lifecycle service - core business logic
//!
//! Mutations are serialized through one async lock, so the check for "is a
//! task being tracked" and the matching server call cannot interleave with
//! another mutation. The timer is only touched after the server has confirmed
//! the change; on failure the timer keeps running exactly as before.
//!
//! Remote results are applied only if the task they concern is still the
//! current one when they arrive. Otherwise they are logged and dropped.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{error, info, instrument, warn};
use trak_domain::constants::{BREAK_DESCRIPTION, BREAK_TITLE};
use trak_domain::{NewTask, Result, Task, TaskId, TaskPatch, TrakError};

use super::ports::TaskApi;
use crate::notifier_ports::{Notification, Notifier};
use crate::store::AppStore;
use crate::timer::TimerController;

/// Result of stopping the current task
#[derive(Debug, Clone, PartialEq)]
pub struct StopOutcome {
    /// Task as finalized by the server (end time, duration in minutes)
    pub task: Task,
    /// Active seconds measured locally, excluding pauses
    pub active_secs: u64,
}

/// Task lifecycle service
pub struct LifecycleService {
    api: Arc<dyn TaskApi>,
    timer: Arc<TimerController>,
    store: Arc<AppStore>,
    notifier: Arc<dyn Notifier>,
    mutation: Mutex<()>,
}

fn validate_title(title: &str) -> Result<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(TrakError::Validation("task title cannot be empty".into()));
    }
    Ok(title.to_string())
}

impl LifecycleService {
    /// Create a new lifecycle service
    pub fn new(
        api: Arc<dyn TaskApi>,
        timer: Arc<TimerController>,
        store: Arc<AppStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self { api, timer, store, notifier, mutation: Mutex::new(()) }
    }

    pub fn timer(&self) -> &Arc<TimerController> {
        &self.timer
    }

    pub fn store(&self) -> &Arc<AppStore> {
        &self.store
    }

    pub fn current_task(&self) -> Option<Task> {
        self.store.current_task()
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.timer.elapsed_seconds()
    }

    fn fail(&self, title: &str, err: TrakError) -> TrakError {
        error!(error = %err, "{title}");
        self.notifier.notify(Notification::error(title, err.to_string()));
        err
    }

    /* ---------------------------------------------------------------------- */
    /* Start / stop */
    /* ---------------------------------------------------------------------- */

    /// Create a task on the server and start timing it
    #[instrument(skip(self, description))]
    pub async fn start_task(&self, title: &str, description: Option<String>) -> Result<Task> {
        let title = validate_title(title).map_err(|e| self.fail("Cannot start task", e))?;
        let guard = self.mutation.lock().await;
        let task = self.start_locked(title, description).await?;
        drop(guard);
        self.refresh().await;
        Ok(task)
    }

    async fn start_locked(&self, title: String, description: Option<String>) -> Result<Task> {
        if let Some(current) = self.timer.task_id().or_else(|| self.store.current_task_id()) {
            return Err(self.fail(
                "Cannot start task",
                TrakError::Validation(format!(
                    "task {current} is already being tracked, stop it first"
                )),
            ));
        }

        let request = NewTask::new(title).with_description(description);
        let task = match self.api.create_task(&request).await {
            Ok(task) => task,
            Err(err) => {
                return Err(self.fail("Failed to start task", TrakError::Creation(err.to_string())));
            }
        };

        self.timer.start(task.id)?;
        self.store.set_current_task(Some(task.clone()), self.timer.snapshot());
        info!(task_id = task.id, title = %task.title, "task started");
        self.notifier.notify(Notification::success("Task started", task.title.clone()));
        Ok(task)
    }

    /// Stop the current task on the server, then stop the timer
    #[instrument(skip(self))]
    pub async fn stop_task(&self) -> Result<StopOutcome> {
        let guard = self.mutation.lock().await;
        let outcome = self.stop_locked().await?;
        drop(guard);
        self.refresh().await;
        Ok(outcome)
    }

    async fn stop_locked(&self) -> Result<StopOutcome> {
        let Some(id) = self.timer.task_id() else {
            return Err(self.fail(
                "Cannot stop task",
                TrakError::Validation("no task is being tracked".into()),
            ));
        };

        let task = self.api.stop_task(id).await.map_err(|e| self.fail("Failed to stop task", e))?;

        let Some(stopped) = self.timer.stop_if(id) else {
            warn!(task_id = id, "stop response arrived after the timer moved on, discarding");
            return Ok(StopOutcome { task, active_secs: 0 });
        };
        self.store.clear_current_if(id, self.timer.snapshot());
        info!(task_id = id, active_secs = stopped.active_secs, "task stopped");
        self.notifier.notify(Notification::success("Task completed", task.title.clone()));
        Ok(StopOutcome { task, active_secs: stopped.active_secs })
    }

    /// Stop whatever is being tracked (if anything), then start a new task
    ///
    /// If stopping fails, nothing new is started.
    #[instrument(skip(self, description))]
    pub async fn switch_task(
        &self,
        title: &str,
        description: Option<String>,
    ) -> Result<(Option<StopOutcome>, Task)> {
        let title = validate_title(title).map_err(|e| self.fail("Cannot start task", e))?;
        let guard = self.mutation.lock().await;
        let stopped = if self.timer.task_id().is_some() {
            Some(self.stop_locked().await?)
        } else {
            None
        };
        let started = self.start_locked(title, description).await;
        drop(guard);
        self.refresh().await;
        Ok((stopped, started?))
    }

    /// Stop the current task and start a break
    pub async fn take_break(&self) -> Result<(Option<StopOutcome>, Task)> {
        self.switch_task(BREAK_TITLE, Some(BREAK_DESCRIPTION.to_string())).await
    }

    /* ---------------------------------------------------------------------- */
    /* Pause / resume */
    /* ---------------------------------------------------------------------- */

    /// Pause the timer; `false` when nothing is running
    pub fn pause(&self) -> bool {
        let changed = self.timer.pause();
        self.store.set_timer(self.timer.snapshot());
        changed
    }

    /// Resume the timer; `false` when nothing is paused
    pub fn resume(&self) -> bool {
        let changed = self.timer.resume();
        self.store.set_timer(self.timer.snapshot());
        changed
    }

    /* ---------------------------------------------------------------------- */
    /* Update / delete */
    /* ---------------------------------------------------------------------- */

    /// Apply a partial update to any task
    #[instrument(skip(self, patch))]
    pub async fn update_task(&self, id: TaskId, patch: TaskPatch) -> Result<Task> {
        let patch = Self::check_patch(patch).map_err(|e| self.fail("Cannot update task", e))?;
        let guard = self.mutation.lock().await;
        let task = self
            .api
            .update_task(id, &patch)
            .await
            .map_err(|e| self.fail("Failed to update task", e))?;
        self.store.replace_current_if_same(&task);
        drop(guard);
        info!(task_id = id, "task updated");
        self.refresh().await;
        Ok(task)
    }

    /// Update a task only while it is still the one being tracked
    ///
    /// Used by background work that started before the user may have moved
    /// on. Returns `Ok(None)` without calling the server when the task is no
    /// longer current.
    pub async fn update_if_current(&self, id: TaskId, patch: TaskPatch) -> Result<Option<Task>> {
        let patch = Self::check_patch(patch)?;
        let guard = self.mutation.lock().await;
        if self.timer.task_id() != Some(id) {
            info!(task_id = id, "task is no longer current, skipping update");
            return Ok(None);
        }
        let task = self.api.update_task(id, &patch).await?;
        if !self.store.replace_current_if_same(&task) {
            warn!(task_id = id, "update response arrived after the task changed, discarding");
        }
        drop(guard);
        self.refresh().await;
        Ok(Some(task))
    }

    fn check_patch(patch: TaskPatch) -> Result<TaskPatch> {
        if patch.is_empty() {
            return Err(TrakError::Validation("nothing to update".into()));
        }
        if let Some(title) = &patch.title {
            let title = validate_title(title)?;
            return Ok(TaskPatch { title: Some(title), ..patch });
        }
        Ok(patch)
    }

    /// Delete a task; resets the timer when it is the current one
    #[instrument(skip(self))]
    pub async fn delete_task(&self, id: TaskId) -> Result<()> {
        let guard = self.mutation.lock().await;
        self.delete_locked(id).await.map_err(|e| self.fail("Failed to delete task", e))?;
        drop(guard);
        self.refresh().await;
        Ok(())
    }

    /// Delete several tasks with a single refresh at the end
    ///
    /// Individual failures are logged and skipped. Returns how many were
    /// deleted.
    pub async fn delete_tasks(&self, ids: &[TaskId]) -> usize {
        let guard = self.mutation.lock().await;
        let mut deleted = 0;
        for &id in ids {
            match self.delete_locked(id).await {
                Ok(()) => deleted += 1,
                Err(err) => warn!(task_id = id, error = %err, "failed to delete task"),
            }
        }
        drop(guard);
        self.refresh().await;
        deleted
    }

    async fn delete_locked(&self, id: TaskId) -> Result<()> {
        self.api.delete_task(id).await?;
        if self.timer.reset_if(id) {
            info!(task_id = id, "deleted the current task, timer reset");
        }
        self.store.clear_current_if(id, self.timer.snapshot());
        info!(task_id = id, "task deleted");
        Ok(())
    }

    /* ---------------------------------------------------------------------- */
    /* Refresh */
    /* ---------------------------------------------------------------------- */

    /// Reload today's tasks, then the stats summary
    ///
    /// Failures are reported but never undo the mutation that triggered the
    /// refresh.
    pub async fn refresh(&self) {
        match self.api.today_tasks().await {
            Ok(tasks) => self.store.set_tasks(tasks),
            Err(err) => {
                warn!(error = %err, "failed to refresh today's tasks");
                self.notifier.notify(Notification::error("Failed to load tasks", err.to_string()));
            }
        }
        match self.api.stats().await {
            Ok(stats) => self.store.set_stats(stats),
            Err(err) => {
                warn!(error = %err, "failed to refresh stats");
                self.notifier.notify(Notification::error("Failed to load stats", err.to_string()));
            }
        }
        self.store.set_timer(self.timer.snapshot());
    }
}
