//! REST client for the TRAK backend
//!
//! Wraps [`HttpClient`] with JSON encoding, status classification and a
//! per-request deadline. Every adapter in this module goes through it.

use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};
use trak_domain::{ApiConfig, TrakError};
use url::Url;

use super::errors::ApiError;
use crate::http::HttpClient;

/// Chat replies are streamed for as long as the model keeps generating.
const STREAM_TIMEOUT: Duration = Duration::from_secs(600);

/// Configuration for API client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClientConfig {
    /// Base URL of the backend (e.g., "http://127.0.0.1:8000")
    pub base_url: String,
    /// Deadline for a single request, including the response body
    pub timeout: Duration,
    /// Total attempts per request
    pub max_attempts: u32,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self::from(&ApiConfig::default())
    }
}

impl From<&ApiConfig> for ApiClientConfig {
    fn from(config: &ApiConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            max_attempts: config.max_attempts,
        }
    }
}

/// JSON client bound to one backend
pub struct ApiClient {
    http: HttpClient,
    config: ApiClientConfig,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// # Errors
    ///
    /// Returns `TrakError::Config` if the base URL is not an http(s) URL or
    /// the HTTP client cannot be built.
    pub fn new(mut config: ApiClientConfig) -> Result<Self, TrakError> {
        let parsed = Url::parse(config.base_url.trim()).map_err(|e| {
            TrakError::Config(format!("invalid API base URL '{}': {}", config.base_url, e))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(TrakError::Config(format!(
                "API base URL must use http or https, got '{}'",
                parsed.scheme()
            )));
        }
        config.base_url = parsed.as_str().trim_end_matches('/').to_string();

        let http = HttpClient::builder()
            .timeout(config.timeout)
            .max_attempts(config.max_attempts)
            .user_agent(concat!("trak/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, config })
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Normalized base URL, without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Execute a GET request
    ///
    /// # Errors
    ///
    /// Returns error if request fails or response cannot be deserialized
    #[instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.get_with_query(path, &[]).await
    }

    /// Execute a GET request with query parameters
    #[instrument(skip(self))]
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!(url = %url, "GET request");

        let mut request = self.http.request(Method::GET, &url);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = self.execute(request, &url).await?;
        Self::decode(response).await
    }

    /// Execute a POST request with a JSON body
    ///
    /// # Errors
    ///
    /// Returns error if request fails or response cannot be deserialized
    #[instrument(skip(self, body))]
    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.url(path);
        debug!(url = %url, "POST request");

        let response = self.execute(self.http.request(Method::POST, &url).json(body), &url).await?;
        Self::decode(response).await
    }

    /// Execute a PUT request with a JSON body
    #[instrument(skip(self, body))]
    pub async fn put<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.url(path);
        debug!(url = %url, "PUT request");

        let response = self.execute(self.http.request(Method::PUT, &url).json(body), &url).await?;
        Self::decode(response).await
    }

    /// Execute a DELETE request, ignoring any response body
    #[instrument(skip(self))]
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.url(path);
        debug!(url = %url, "DELETE request");

        self.execute(self.http.request(Method::DELETE, &url), &url).await?;
        Ok(())
    }

    /// POST a JSON body and hand back the raw response for incremental
    /// reading. Only the status line is awaited here.
    #[instrument(skip(self, body))]
    pub async fn post_stream<B>(&self, path: &str, body: &B) -> Result<Response, ApiError>
    where
        B: Serialize + Sync + ?Sized,
    {
        let url = self.url(path);
        debug!(url = %url, "POST stream request");

        let request = self
            .http
            .request(Method::POST, &url)
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .timeout(STREAM_TIMEOUT)
            .json(body);
        self.execute(request, &url).await
    }

    async fn execute(&self, request: RequestBuilder, url: &str) -> Result<Response, ApiError> {
        let timeout = self.config.timeout;
        let response = match tokio::time::timeout(timeout, self.http.send(request)).await {
            Ok(Ok(response)) => response,
            Ok(Err(err)) => return Err(ApiError::Network(err.to_string())),
            Err(_) => return Err(ApiError::Timeout(timeout)),
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::map_status_error(status, url, body));
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();

        // 204/205 carry no body by RFC
        if status == StatusCode::NO_CONTENT || status == StatusCode::RESET_CONTENT {
            return serde_json::from_value(serde_json::Value::Null).map_err(|_| {
                ApiError::Decode(format!(
                    "no content response ({}), but a body was expected",
                    status.as_u16()
                ))
            });
        }

        let bytes = response.bytes().await.map_err(|e| ApiError::Network(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn map_status_error(status: StatusCode, url: &str, body: String) -> ApiError {
        let message = detail_message(&body);
        let url = url.to_string();
        let status = status.as_u16();

        if (500..600).contains(&status) {
            ApiError::Server { status, url, message }
        } else {
            ApiError::Client { status, url, message }
        }
    }
}

/// The backend reports failures as `{"detail": ...}`; fall back to the raw
/// body for anything else.
fn detail_message(body: &str) -> String {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("detail").cloned());

    match detail {
        Some(serde_json::Value::String(text)) => text,
        Some(other) => other.to_string(),
        None => body.trim().to_string(),
    }
}

/// Builder for API client
#[derive(Default)]
pub struct ApiClientBuilder {
    config: Option<ApiClientConfig>,
    base_url: Option<String>,
}

impl ApiClientBuilder {
    /// Set the API configuration
    #[must_use]
    pub fn config(mut self, config: ApiClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Override the configured base URL
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Build the API client
    ///
    /// # Errors
    ///
    /// Returns `TrakError::Config` if the resulting base URL is invalid
    pub fn build(self) -> Result<ApiClient, TrakError> {
        let mut config = self.config.unwrap_or_default();
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        ApiClient::new(config)
    }
}
