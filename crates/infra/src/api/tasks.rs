//! `TaskApi` over the `/tasks` endpoints

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};
use trak_core::TaskApi;
use trak_domain::{NewTask, Result, Stats, Task, TaskId, TaskPatch};

use super::client::ApiClient;

/// Task endpoints of the REST backend
pub struct RestTaskApi {
    client: Arc<ApiClient>,
}

impl RestTaskApi {
    pub const fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TaskApi for RestTaskApi {
    #[instrument(skip(self, task), fields(title = %task.title))]
    async fn create_task(&self, task: &NewTask) -> Result<Task> {
        let created: Task = self.client.post("/tasks/", task).await?;
        debug!(task_id = created.id, "Task created");
        Ok(created)
    }

    async fn list_tasks(&self) -> Result<Vec<Task>> {
        Ok(self.client.get("/tasks/").await?)
    }

    async fn today_tasks(&self) -> Result<Vec<Task>> {
        Ok(self.client.get("/tasks/today").await?)
    }

    async fn get_task(&self, id: TaskId) -> Result<Task> {
        Ok(self.client.get(&format!("/tasks/{id}")).await?)
    }

    #[instrument(skip(self, patch))]
    async fn update_task(&self, id: TaskId, patch: &TaskPatch) -> Result<Task> {
        Ok(self.client.put(&format!("/tasks/{id}"), patch).await?)
    }

    #[instrument(skip(self))]
    async fn delete_task(&self, id: TaskId) -> Result<()> {
        self.client.delete(&format!("/tasks/{id}")).await?;
        debug!(task_id = id, "Task deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn stop_task(&self, id: TaskId) -> Result<Task> {
        Ok(self.client.post(&format!("/tasks/{id}/stop"), &serde_json::json!({})).await?)
    }

    async fn stats(&self) -> Result<Stats> {
        Ok(self.client.get("/tasks/stats/summary").await?)
    }
}
