//! REST adapters against a mock backend

mod support;

use serde_json::json;
use support::{client_for, completed_task, running_task};
use trak_core::{AiApi, SettingsApi, TaskApi};
use trak_domain::{
    NewTask, SummaryRequest, SummaryTask, TaskPatch, TaskStatus, TitleRequest, TrakError,
};
use trak_infra::{RestAiApi, RestSettingsApi, RestTaskApi};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_create_task_posts_title_and_description() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tasks/"))
        .and(body_json(json!({"title": "Write report", "description": "Q2 numbers", "tags": []})))
        .respond_with(ResponseTemplate::new(200).set_body_json(running_task(7, "Write report")))
        .expect(1)
        .mount(&server)
        .await;

    let api = RestTaskApi::new(client_for(&server));
    let task = api
        .create_task(&NewTask::new("Write report").with_description(Some("Q2 numbers".into())))
        .await
        .expect("created");

    assert_eq!(task.id, 7);
    assert_eq!(task.status, Some(TaskStatus::InProgress));
    assert_eq!(task.start_time.to_rfc3339(), "2024-05-01T09:00:00+00:00");
    assert!(!task.is_completed());
}

#[tokio::test]
async fn test_update_task_sends_only_present_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/tasks/7"))
        .and(body_json(json!({"title": "Renamed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(running_task(7, "Renamed")))
        .expect(1)
        .mount(&server)
        .await;

    let api = RestTaskApi::new(client_for(&server));
    let patch = TaskPatch { title: Some("Renamed".into()), ..TaskPatch::default() };
    let task = api.update_task(7, &patch).await.expect("updated");
    assert_eq!(task.title, "Renamed");
}

#[tokio::test]
async fn test_stop_task_returns_server_duration() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tasks/7/stop"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completed_task(7, "Write report", 90.0)))
        .expect(1)
        .mount(&server)
        .await;

    let api = RestTaskApi::new(client_for(&server));
    let task = api.stop_task(7).await.expect("stopped");
    assert!(task.is_completed());
    assert!((task.duration_minutes() - 90.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_list_endpoints_decode_arrays() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tasks/today"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([running_task(2, "b"), completed_task(1, "a", 12.5)])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tasks/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let api = RestTaskApi::new(client_for(&server));
    let today = api.today_tasks().await.expect("today");
    assert_eq!(today.iter().map(|t| t.id).collect::<Vec<_>>(), vec![2, 1]);
    assert!(api.list_tasks().await.expect("all").is_empty());
}

#[tokio::test]
async fn test_missing_task_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tasks/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Task not found"})))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/tasks/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Task not found"})))
        .mount(&server)
        .await;

    let api = RestTaskApi::new(client_for(&server));
    assert!(matches!(api.get_task(99).await, Err(TrakError::NotFound(_))));
    assert!(matches!(api.delete_task(99).await, Err(TrakError::NotFound(_))));
}

#[tokio::test]
async fn test_delete_ignores_message_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/tasks/3"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Task deleted successfully"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    RestTaskApi::new(client_for(&server)).delete_task(3).await.expect("deleted");
}

#[tokio::test]
async fn test_server_failure_is_a_network_error_and_not_repeated() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tasks/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let api = RestTaskApi::new(client_for(&server));
    let err = api.create_task(&NewTask::new("x")).await.unwrap_err();
    assert!(matches!(err, TrakError::Network(_)), "got {err:?}");
}

#[tokio::test]
async fn test_stats_accept_camel_case_all_time() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tasks/stats/summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "today": {"tasks_count": 3, "total_time": 95.5, "breaks": 1},
            "allTime": {"tasks_count": 40, "total_time": 1200.0}
        })))
        .mount(&server)
        .await;

    let stats = RestTaskApi::new(client_for(&server)).stats().await.expect("stats");
    assert_eq!(stats.today.tasks_count, 3);
    assert_eq!(stats.today.breaks, Some(1));
    assert_eq!(stats.all_time.tasks_count, 40);
}

#[tokio::test]
async fn test_settings_round_trip_as_strings() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/settings/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "use_ai": "true",
            "ollama_model": null
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/settings/"))
        .and(body_json(json!({"key": "close_to_tray", "value": "false"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"key": "close_to_tray", "value": "false"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/settings/ollama_url"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"key": "ollama_url", "value": "http://localhost:11434"})),
        )
        .mount(&server)
        .await;

    let api = RestSettingsApi::new(client_for(&server));

    let all = api.all_settings().await.expect("settings");
    assert_eq!(all.get("use_ai"), Some(&Some("true".to_string())));
    assert_eq!(all.get("ollama_model"), Some(&None));

    let saved = api.put_setting("close_to_tray", "false").await.expect("saved");
    assert_eq!(saved.value.as_deref(), Some("false"));

    let url = api.get_setting("ollama_url").await.expect("setting");
    assert_eq!(url.value.as_deref(), Some("http://localhost:11434"));
}

#[tokio::test]
async fn test_ai_requests_carry_model_and_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ai/generate-title"))
        .and(body_json(json!({
            "description": "fixing the login bug",
            "model": "mistral",
            "url": "http://localhost:11434"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"title": "\"Fix Login Bug\""})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/ai/generate-summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"summary": "Busy day."})))
        .expect(1)
        .mount(&server)
        .await;

    let api = RestAiApi::new(client_for(&server));
    let title = api
        .generate_title(&TitleRequest {
            description: "fixing the login bug".into(),
            model: "mistral".into(),
            url: "http://localhost:11434".into(),
        })
        .await
        .expect("title");
    // quotes are stripped by the assistant, not the adapter
    assert_eq!(title.title, "\"Fix Login Bug\"");

    let summary = api
        .generate_summary(&SummaryRequest {
            tasks: vec![SummaryTask { title: "a".into(), description: String::new(), duration: 30.0 }],
            model: "mistral".into(),
            url: "http://localhost:11434".into(),
        })
        .await
        .expect("summary");
    assert_eq!(summary.summary, "Busy day.");
}

#[tokio::test]
async fn test_ai_status_passes_ollama_url_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ai/status"))
        .and(query_param("url", "http://gpu-box:11434"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "available": true,
            "models": [{"name": "mistral:7b-instruct-q4_0"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let status = RestAiApi::new(client_for(&server)).status("http://gpu-box:11434").await.unwrap();
    assert!(status.available);
    assert_eq!(status.model_names(), vec!["mistral:7b-instruct-q4_0"]);
}
