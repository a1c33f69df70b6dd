//! Payloads for the backend's `/ai` endpoints
//!
//! Every request names the model and Ollama URL from the user's settings; the
//! backend itself holds no AI configuration.

use serde::{Deserialize, Serialize};

/// `POST /ai/generate-title`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleRequest {
    pub description: String,
    pub model: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleResponse {
    pub title: String,
}

/// Completed task as summarized by `POST /ai/generate-summary`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryTask {
    pub title: String,
    pub description: String,
    /// Minutes
    pub duration: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRequest {
    pub tasks: Vec<SummaryTask>,
    pub model: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
}

/// `POST /ai/generate-category`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRequest {
    pub title: String,
    pub description: String,
    pub model: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub category: String,
}

/// `GET /ai/status`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AiStatus {
    pub available: bool,
    /// Model descriptors exactly as Ollama lists them
    #[serde(default)]
    pub models: Vec<serde_json::Value>,
}

impl AiStatus {
    /// Names of the installed models, skipping entries without one
    pub fn model_names(&self) -> Vec<String> {
        self.models
            .iter()
            .filter_map(|m| m.get("name").and_then(serde_json::Value::as_str))
            .map(str::to_string)
            .collect()
    }
}

/* -------------------------------------------------------------------------- */
/* Chat */
/* -------------------------------------------------------------------------- */

/// Totals passed to the assistant, minutes rounded to whole numbers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextStats {
    pub tasks_count: u64,
    pub total_time: i64,
}

/// Snapshot of the user's tracking data sent with each chat message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatContext {
    pub today_stats: ContextStats,
    pub alltime_stats: ContextStats,
    /// Entries formatted as `"title" (N min)`
    pub recent_tasks: Vec<String>,
    /// Title of the tracked task, or `None` as a literal string
    pub current_task: String,
}

/// `POST /ai/chat`, answered with a server-sent event stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub context: ChatContext,
    pub model: String,
    pub url: String,
}

/// JSON payload of one `data:` line in the chat stream
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChatFrame {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub done: Option<bool>,
}

/// Decoded chat stream event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    Token(String),
    Error(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_lists_model_names() {
        let status: AiStatus = serde_json::from_str(
            r#"{"available": true, "models": [{"name": "mistral"}, {"size": 1}, {"name": "llama3"}]}"#,
        )
        .unwrap();
        assert_eq!(status.model_names(), vec!["mistral", "llama3"]);
    }

    #[test]
    fn chat_frame_fields_are_optional() {
        let frame: ChatFrame = serde_json::from_str(r#"{"done": true}"#).unwrap();
        assert_eq!(frame.done, Some(true));
        assert!(frame.token.is_none());
    }

    #[test]
    fn chat_request_shape() {
        let request = ChatRequest {
            message: "How am I doing?".into(),
            context: ChatContext { current_task: "None".into(), ..ChatContext::default() },
            model: "m".into(),
            url: "http://localhost:11434".into(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["context"]["current_task"], "None");
        assert_eq!(value["context"]["today_stats"]["tasks_count"], 0);
    }
}
