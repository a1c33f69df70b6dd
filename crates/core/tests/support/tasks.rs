//! In-memory mocks for the task and settings ports.

use async_trait::async_trait;
use chrono::DateTime;
use parking_lot::Mutex;
use trak_common::time::{Clock, MockClock};
use trak_core::{SettingsApi, TaskApi};
use trak_domain::{
    NewTask, PeriodStats, Result as DomainResult, SettingEntry, SettingsMap, Stats, Task, TaskId,
    TaskPatch, TaskStatus, TrakError,
};

/// Calls recorded by [`MockTaskApi`]
#[derive(Debug, Clone, PartialEq)]
pub enum TaskCall {
    Create(String),
    List,
    Today,
    Get(TaskId),
    Update(TaskId, TaskPatch),
    Delete(TaskId),
    Stop(TaskId),
    Stats,
}

#[derive(Default)]
struct Failures {
    create: bool,
    stop: bool,
    delete: bool,
    update: bool,
    today: bool,
    stats: bool,
}

/// Backend stand-in that stores tasks in memory
pub struct MockTaskApi {
    clock: MockClock,
    tasks: Mutex<Vec<Task>>,
    next_id: Mutex<TaskId>,
    calls: Mutex<Vec<TaskCall>>,
    failures: Mutex<Failures>,
}

fn down() -> TrakError {
    TrakError::Network("connection refused".into())
}

impl MockTaskApi {
    pub fn new(clock: MockClock) -> Self {
        Self {
            clock,
            tasks: Mutex::new(Vec::new()),
            next_id: Mutex::new(1),
            calls: Mutex::new(Vec::new()),
            failures: Mutex::new(Failures::default()),
        }
    }

    fn now(&self) -> chrono::DateTime<chrono::Utc> {
        DateTime::from_timestamp_millis(self.clock.now_millis()).unwrap_or_default()
    }

    pub fn calls(&self) -> Vec<TaskCall> {
        self.calls.lock().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    pub fn stored(&self) -> Vec<Task> {
        self.tasks.lock().clone()
    }

    pub fn fail_create(&self, fail: bool) {
        self.failures.lock().create = fail;
    }

    pub fn fail_stop(&self, fail: bool) {
        self.failures.lock().stop = fail;
    }

    pub fn fail_delete(&self, fail: bool) {
        self.failures.lock().delete = fail;
    }

    pub fn fail_update(&self, fail: bool) {
        self.failures.lock().update = fail;
    }

    pub fn fail_refresh(&self, fail: bool) {
        let mut failures = self.failures.lock();
        failures.today = fail;
        failures.stats = fail;
    }

    /// Seed a completed task directly
    pub fn seed_completed(&self, title: &str, minutes: f64) -> Task {
        let id = {
            let mut next = self.next_id.lock();
            let id = *next;
            *next += 1;
            id
        };
        let now = self.now();
        let task = Task {
            id,
            title: title.to_string(),
            description: Some(format!("{title} details")),
            category: None,
            tags: Vec::new(),
            start_time: now,
            end_time: Some(now),
            duration: Some(minutes),
            status: Some(TaskStatus::Completed),
            created_at: Some(now),
            updated_at: Some(now),
        };
        self.tasks.lock().push(task.clone());
        task
    }

    fn find(&self, id: TaskId) -> DomainResult<Task> {
        self.tasks
            .lock()
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| TrakError::NotFound(format!("task {id}")))
    }
}

#[async_trait]
impl TaskApi for MockTaskApi {
    async fn create_task(&self, task: &NewTask) -> DomainResult<Task> {
        self.calls.lock().push(TaskCall::Create(task.title.clone()));
        if self.failures.lock().create {
            return Err(down());
        }
        let id = {
            let mut next = self.next_id.lock();
            let id = *next;
            *next += 1;
            id
        };
        let now = self.now();
        let created = Task {
            id,
            title: task.title.clone(),
            description: task.description.clone(),
            category: task.category.clone(),
            tags: task.tags.clone(),
            start_time: now,
            end_time: None,
            duration: Some(0.0),
            status: Some(TaskStatus::InProgress),
            created_at: Some(now),
            updated_at: Some(now),
        };
        self.tasks.lock().push(created.clone());
        Ok(created)
    }

    async fn list_tasks(&self) -> DomainResult<Vec<Task>> {
        self.calls.lock().push(TaskCall::List);
        Ok(self.tasks.lock().clone())
    }

    async fn today_tasks(&self) -> DomainResult<Vec<Task>> {
        self.calls.lock().push(TaskCall::Today);
        if self.failures.lock().today {
            return Err(down());
        }
        Ok(self.tasks.lock().clone())
    }

    async fn get_task(&self, id: TaskId) -> DomainResult<Task> {
        self.calls.lock().push(TaskCall::Get(id));
        self.find(id)
    }

    async fn update_task(&self, id: TaskId, patch: &TaskPatch) -> DomainResult<Task> {
        self.calls.lock().push(TaskCall::Update(id, patch.clone()));
        if self.failures.lock().update {
            return Err(down());
        }
        let mut tasks = self.tasks.lock();
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| TrakError::NotFound(format!("task {id}")))?;
        patch.apply_to(task);
        Ok(task.clone())
    }

    async fn delete_task(&self, id: TaskId) -> DomainResult<()> {
        self.calls.lock().push(TaskCall::Delete(id));
        if self.failures.lock().delete {
            return Err(down());
        }
        let mut tasks = self.tasks.lock();
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Err(TrakError::NotFound(format!("task {id}")));
        }
        Ok(())
    }

    async fn stop_task(&self, id: TaskId) -> DomainResult<Task> {
        self.calls.lock().push(TaskCall::Stop(id));
        if self.failures.lock().stop {
            return Err(down());
        }
        let now = self.now();
        let mut tasks = self.tasks.lock();
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| TrakError::NotFound(format!("task {id}")))?;
        task.end_time = Some(now);
        task.status = Some(TaskStatus::Completed);
        #[allow(clippy::cast_precision_loss)]
        let minutes = (now - task.start_time).num_seconds() as f64 / 60.0;
        task.duration = Some((minutes * 100.0).round() / 100.0);
        Ok(task.clone())
    }

    async fn stats(&self) -> DomainResult<Stats> {
        self.calls.lock().push(TaskCall::Stats);
        if self.failures.lock().stats {
            return Err(down());
        }
        let tasks = self.tasks.lock();
        let total: f64 = tasks.iter().map(Task::duration_minutes).sum();
        let period = PeriodStats { tasks_count: tasks.len() as u64, total_time: total, breaks: None };
        Ok(Stats { today: period.clone(), all_time: period })
    }
}

/// Settings stand-in
#[derive(Default)]
pub struct MockSettingsApi {
    values: Mutex<SettingsMap>,
    puts: Mutex<Vec<(String, String)>>,
    fail: Mutex<bool>,
}

impl MockSettingsApi {
    pub fn set(&self, key: &str, value: &str) {
        self.values.lock().insert(key.to_string(), Some(value.to_string()));
    }

    pub fn puts(&self) -> Vec<(String, String)> {
        self.puts.lock().clone()
    }

    pub fn fail(&self, fail: bool) {
        *self.fail.lock() = fail;
    }
}

#[async_trait]
impl SettingsApi for MockSettingsApi {
    async fn all_settings(&self) -> DomainResult<SettingsMap> {
        if *self.fail.lock() {
            return Err(down());
        }
        Ok(self.values.lock().clone())
    }

    async fn get_setting(&self, key: &str) -> DomainResult<SettingEntry> {
        if *self.fail.lock() {
            return Err(down());
        }
        let value = self.values.lock().get(key).cloned().flatten();
        Ok(SettingEntry { key: key.to_string(), value })
    }

    async fn put_setting(&self, key: &str, value: &str) -> DomainResult<SettingEntry> {
        if *self.fail.lock() {
            return Err(down());
        }
        self.puts.lock().push((key.to_string(), value.to_string()));
        self.set(key, value);
        Ok(SettingEntry { key: key.to_string(), value: Some(value.to_string()) })
    }
}
