//! Transport layer under [`ApiClient`](crate::api::ApiClient)
//!
//! One attempt per request unless the caller opts in. Even then only
//! idempotent methods are repeated: `POST /tasks/` or `POST /tasks/{id}/stop`
//! must never run twice because a response was lost.

use std::time::Duration;

use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::{debug, warn};
use trak_domain::constants::{DEFAULT_API_MAX_ATTEMPTS, DEFAULT_API_TIMEOUT_SECS};
use trak_domain::TrakError;

use crate::errors::InfraError;

const DEFAULT_BASE_BACKOFF: Duration = Duration::from_millis(200);
const MAX_BACKOFF_SHIFT: u32 = 8;

/// Result of a single round trip; `Transient` outcomes may be repeated
enum Attempt {
    Finished(Result<Response, TrakError>),
    Transient(Result<Response, TrakError>),
}

/// Thin reqwest wrapper with timeout and opt-in retries
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    max_attempts: u32,
    base_backoff: Duration,
}

impl HttpClient {
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Client with the default timeout and a single attempt
    pub fn new() -> Result<Self, TrakError> {
        Self::builder().build()
    }

    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Send `builder`, repeating transient failures of idempotent requests
    /// up to the configured attempt count
    ///
    /// The last response (5xx included) is handed back as-is; status
    /// classification belongs to the caller.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, TrakError> {
        let mut attempt = 1;
        loop {
            let request = match builder.try_clone() {
                Some(copy) => copy.build().map_err(|err| TrakError::from(InfraError::from(err)))?,
                // Streaming bodies cannot be replayed
                None => return self.send_once(builder).await,
            };
            let repeatable = attempt < self.max_attempts && is_idempotent(request.method());
            let (method, url) = (request.method().clone(), request.url().clone());
            debug!(attempt, %method, %url, "sending HTTP request");

            match self.round_trip(request).await {
                Attempt::Transient(outcome) if repeatable => {
                    let reason = match &outcome {
                        Ok(response) => response.status().to_string(),
                        Err(err) => err.to_string(),
                    };
                    warn!(attempt, %method, %url, %reason, "transient failure, retrying");
                    drop(outcome);
                    self.pause_before(attempt).await;
                    attempt += 1;
                }
                Attempt::Finished(outcome) | Attempt::Transient(outcome) => return outcome,
            }
        }
    }

    async fn send_once(&self, builder: RequestBuilder) -> Result<Response, TrakError> {
        let request = builder.build().map_err(|err| TrakError::from(InfraError::from(err)))?;
        match self.round_trip(request).await {
            Attempt::Finished(outcome) | Attempt::Transient(outcome) => outcome,
        }
    }

    async fn round_trip(&self, request: reqwest::Request) -> Attempt {
        match self.client.execute(request).await {
            Ok(response) if response.status().is_server_error() => Attempt::Transient(Ok(response)),
            Ok(response) => {
                debug!(status = %response.status(), "received HTTP response");
                Attempt::Finished(Ok(response))
            }
            Err(err) if is_transient(&err) => Attempt::Transient(Err(InfraError::from(err).into())),
            Err(err) => Attempt::Finished(Err(InfraError::from(err).into())),
        }
    }

    fn backoff_delay(&self, attempt: u32) -> Duration {
        let shift = attempt.saturating_sub(1).min(MAX_BACKOFF_SHIFT);
        self.base_backoff.saturating_mul(1u32 << shift)
    }

    async fn pause_before(&self, attempt: u32) {
        let delay = self.backoff_delay(attempt);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Methods the backend treats as safe to repeat
fn is_idempotent(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::PUT | Method::DELETE | Method::OPTIONS)
}

fn is_transient(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || err.is_request()
}

#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    max_attempts: u32,
    base_backoff: Duration,
    user_agent: Option<String>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_API_TIMEOUT_SECS),
            max_attempts: DEFAULT_API_MAX_ATTEMPTS,
            base_backoff: DEFAULT_BASE_BACKOFF,
            user_agent: None,
        }
    }
}

impl HttpClientBuilder {
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Total attempts for idempotent requests, clamped to at least one
    #[must_use]
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    #[must_use]
    pub const fn base_backoff(mut self, backoff: Duration) -> Self {
        self.base_backoff = backoff;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// # Errors
    ///
    /// Returns `TrakError::Config` if the TLS backend cannot be initialised.
    pub fn build(self) -> Result<HttpClient, TrakError> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();
        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }
        let client = builder.build().map_err(|err| TrakError::from(InfraError::from(err)))?;

        Ok(HttpClient {
            client,
            max_attempts: self.max_attempts.max(1),
            base_backoff: self.base_backoff,
        })
    }
}
