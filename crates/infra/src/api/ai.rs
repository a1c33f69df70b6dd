//! `AiApi` over the `/ai` endpoints

use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use tracing::{debug, instrument};
use trak_core::{AiApi, ChatStream};
use trak_domain::{
    AiStatus, CategoryRequest, CategoryResponse, ChatRequest, Result, SummaryRequest,
    SummaryResponse, TitleRequest, TitleResponse,
};

use super::client::ApiClient;
use super::sse::chat_events;

/// AI endpoints of the REST backend
pub struct RestAiApi {
    client: Arc<ApiClient>,
}

impl RestAiApi {
    pub const fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AiApi for RestAiApi {
    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn generate_title(&self, request: &TitleRequest) -> Result<TitleResponse> {
        Ok(self.client.post("/ai/generate-title", request).await?)
    }

    #[instrument(skip(self, request), fields(tasks = request.tasks.len()))]
    async fn generate_summary(&self, request: &SummaryRequest) -> Result<SummaryResponse> {
        Ok(self.client.post("/ai/generate-summary", request).await?)
    }

    async fn generate_category(&self, request: &CategoryRequest) -> Result<CategoryResponse> {
        Ok(self.client.post("/ai/generate-category", request).await?)
    }

    async fn status(&self, ollama_url: &str) -> Result<AiStatus> {
        Ok(self.client.get_with_query("/ai/status", &[("url", ollama_url)]).await?)
    }

    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn chat(&self, request: &ChatRequest) -> Result<ChatStream> {
        let response = self.client.post_stream("/ai/chat", request).await?;
        debug!(status = %response.status(), "chat stream opened");
        Ok(chat_events(response.bytes_stream()).boxed())
    }
}
