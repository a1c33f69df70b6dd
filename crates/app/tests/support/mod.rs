//! Shared helpers for the app integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{json, Value};
use trak_app::adapters::{ConsoleNotifier, HeadlessWindow};
use trak_app::console::Captured;
use trak_app::{AppContext, Console};
use trak_domain::Config;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A wired context plus everything a test needs to observe it
pub struct TestApp {
    pub ctx: Arc<AppContext>,
    pub console: Console,
    pub output: Captured,
    pub window: Arc<HeadlessWindow>,
}

/// Build a context against `server`, capturing console output
pub fn app_for(server: &MockServer) -> TestApp {
    let (console, output) = Console::capture();
    let window = Arc::new(HeadlessWindow::new(server.uri()));
    let notifier = Arc::new(ConsoleNotifier::new(console.clone()));
    let ctx = AppContext::new(Config::default(), window.clone(), notifier).expect("context");
    TestApp { ctx: Arc::new(ctx), console, output, window }
}

/// Mount the three read endpoints hit on startup and after every mutation
pub async fn mount_reads(server: &MockServer, settings: Value, today: Value) {
    Mock::given(method("GET"))
        .and(path("/settings/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(settings))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tasks/today"))
        .respond_with(ResponseTemplate::new(200).set_body_json(today))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tasks/stats/summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "today": {"tasks_count": 1, "total_time": 65.0, "breaks": 0},
            "all_time": {"tasks_count": 12, "total_time": 600.0}
        })))
        .mount(server)
        .await;
}

/// Settings with the assistant switched off
pub fn plain_settings() -> Value {
    json!({"use_ai": "false", "close_to_tray": "true"})
}

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

pub fn completed_task(id: i64, title: &str, minutes: f64) -> Value {
    let mut task = running_task(id, title);
    task["end_time"] = json!("2024-05-01T10:05:00");
    task["duration"] = json!(minutes);
    task["status"] = json!("completed");
    task
}
