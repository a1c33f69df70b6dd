//! Port interfaces for the task endpoints
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations.

use async_trait::async_trait;
use trak_domain::{NewTask, Result, Stats, Task, TaskId, TaskPatch};

/// Task persistence, owned by the REST backend
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// `POST /tasks/`; the server stamps the start time
    async fn create_task(&self, task: &NewTask) -> Result<Task>;

    /// `GET /tasks/`
    async fn list_tasks(&self) -> Result<Vec<Task>>;

    /// `GET /tasks/today`
    async fn today_tasks(&self) -> Result<Vec<Task>>;

    /// `GET /tasks/{id}`
    async fn get_task(&self, id: TaskId) -> Result<Task>;

    /// `PUT /tasks/{id}`
    async fn update_task(&self, id: TaskId, patch: &TaskPatch) -> Result<Task>;

    /// `DELETE /tasks/{id}`
    async fn delete_task(&self, id: TaskId) -> Result<()>;

    /// `POST /tasks/{id}/stop`; the server sets end time and duration
    async fn stop_task(&self, id: TaskId) -> Result<Task>;

    /// `GET /tasks/stats/summary`
    async fn stats(&self) -> Result<Stats>;
}
