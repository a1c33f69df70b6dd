//! Scripted mock for the AI port.

use async_trait::async_trait;
use futures::stream;
use parking_lot::Mutex;
use trak_core::{AiApi, ChatStream};
use trak_domain::{
    AiStatus, CategoryRequest, CategoryResponse, ChatEvent, ChatRequest, Result as DomainResult,
    SummaryRequest, SummaryResponse, TitleRequest, TitleResponse, TrakError,
};

/// Replies are configured up front; every request is recorded.
#[derive(Default)]
pub struct MockAiApi {
    title: Mutex<String>,
    chat_events: Mutex<Vec<DomainResult<ChatEvent>>>,
    fail: Mutex<bool>,
    title_requests: Mutex<Vec<TitleRequest>>,
    summary_requests: Mutex<Vec<SummaryRequest>>,
    chat_requests: Mutex<Vec<ChatRequest>>,
    calls: Mutex<usize>,
}

impl MockAiApi {
    pub fn reply_title(&self, title: &str) {
        *self.title.lock() = title.to_string();
    }

    pub fn reply_chat(&self, events: Vec<DomainResult<ChatEvent>>) {
        *self.chat_events.lock() = events;
    }

    pub fn fail(&self, fail: bool) {
        *self.fail.lock() = fail;
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock()
    }

    pub fn title_requests(&self) -> Vec<TitleRequest> {
        self.title_requests.lock().clone()
    }

    pub fn summary_requests(&self) -> Vec<SummaryRequest> {
        self.summary_requests.lock().clone()
    }

    pub fn chat_requests(&self) -> Vec<ChatRequest> {
        self.chat_requests.lock().clone()
    }

    fn enter(&self) -> DomainResult<()> {
        *self.calls.lock() += 1;
        if *self.fail.lock() {
            Err(TrakError::Network("Ollama is not available".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl AiApi for MockAiApi {
    async fn generate_title(&self, request: &TitleRequest) -> DomainResult<TitleResponse> {
        self.title_requests.lock().push(request.clone());
        self.enter()?;
        Ok(TitleResponse { title: self.title.lock().clone() })
    }

    async fn generate_summary(&self, request: &SummaryRequest) -> DomainResult<SummaryResponse> {
        self.summary_requests.lock().push(request.clone());
        self.enter()?;
        Ok(SummaryResponse { summary: format!("You finished {} tasks.", request.tasks.len()) })
    }

    async fn generate_category(&self, _request: &CategoryRequest) -> DomainResult<CategoryResponse> {
        self.enter()?;
        Ok(CategoryResponse { category: "\"Development\"".into() })
    }

    async fn status(&self, _ollama_url: &str) -> DomainResult<AiStatus> {
        self.enter()?;
        Ok(AiStatus { available: true, models: vec![serde_json::json!({"name": "mistral"})] })
    }

    async fn chat(&self, request: &ChatRequest) -> DomainResult<ChatStream> {
        self.chat_requests.lock().push(request.clone());
        self.enter()?;
        let events = std::mem::take(&mut *self.chat_events.lock());
        Ok(Box::pin(stream::iter(events)))
    }
}
