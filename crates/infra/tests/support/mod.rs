//! Shared helpers for the REST adapter tests.

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{json, Value};
use trak_infra::api::ApiClient;
use wiremock::MockServer;

/// Client pointed at a running mock backend
pub fn client_for(server: &MockServer) -> Arc<ApiClient> {
    Arc::new(ApiClient::builder().base_url(server.uri()).build().expect("api client"))
}

/// A running task as the backend serializes it (naive UTC timestamps)
pub fn running_task(id: i64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": null,
        "category": null,
        "tags": [],
        "start_time": "2024-05-01T09:00:00",
        "end_time": null,
        "duration": null,
        "status": "in_progress",
        "created_at": "2024-05-01T09:00:00",
        "updated_at": null
    })
}

/// A finished task with its server-computed duration in minutes
pub fn completed_task(id: i64, title: &str, minutes: f64) -> Value {
    let mut task = running_task(id, title);
    task["end_time"] = json!("2024-05-01T10:30:00");
    task["duration"] = json!(minutes);
    task["status"] = json!("completed");
    task
}
