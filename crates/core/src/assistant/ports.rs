//! Port interfaces for the AI endpoints

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;
use trak_domain::{
    AiStatus, CategoryRequest, CategoryResponse, ChatEvent, ChatRequest, Result, SummaryRequest,
    SummaryResponse, TitleRequest, TitleResponse,
};

/// Incrementally decoded chat reply
pub type ChatStream = Pin<Box<dyn Stream<Item = Result<ChatEvent>> + Send>>;

/// AI features of the REST backend
#[async_trait]
pub trait AiApi: Send + Sync {
    /// `POST /ai/generate-title`
    async fn generate_title(&self, request: &TitleRequest) -> Result<TitleResponse>;

    /// `POST /ai/generate-summary`
    async fn generate_summary(&self, request: &SummaryRequest) -> Result<SummaryResponse>;

    /// `POST /ai/generate-category`
    async fn generate_category(&self, request: &CategoryRequest) -> Result<CategoryResponse>;

    /// `GET /ai/status?url=...`
    async fn status(&self, ollama_url: &str) -> Result<AiStatus>;

    /// `POST /ai/chat`; the stream ends on the `done` frame or when the body
    /// closes
    async fn chat(&self, request: &ChatRequest) -> Result<ChatStream>;
}
