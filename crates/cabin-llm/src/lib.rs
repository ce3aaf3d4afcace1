//! OpenAI-compatible backend for the Cabin's remote interpreter.
//!
//! Sends the engine's [`RemoteRequest`] as a chat-completions call with a
//! JSON-object reply format and hands back the raw message content. Parsing
//! and sanitizing the reply stay in the engine.

/// Chat-completions wire types.
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use cabin_engine::{BackendError, EngineConfig, RemoteRequest, SemanticBackend};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::debug;

use types::{ChatMessage, ChatRequest, ChatResponse, ResponseFormat};

/// Default API base.
pub const OPENAI_API_URL: &str = "https://api.openai.com/v1";

/// Chat-completions client used as a [`SemanticBackend`].
#[derive(Debug, Clone)]
pub struct OpenAiBackend {
    api_key: String,
    model: String,
    base_url: String,
    http: reqwest::Client,
}

impl OpenAiBackend {
    /// A client for `model` against the default API.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: OPENAI_API_URL.to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Built from configuration; `None` without an API key.
    pub fn from_config(config: &EngineConfig) -> Option<Self> {
        if !config.has_remote() {
            return None;
        }
        let key = config.openai_api_key.as_deref()?;
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout() + Duration::from_secs(1))
            .build()
            .unwrap_or_default();
        Some(Self {
            http,
            ..Self::new(key, config.openai_model.as_str()).with_base_url(&config.api_base_url)
        })
    }

    /// Point at another OpenAI-compatible server.
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Completions endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn headers(&self) -> Result<HeaderMap, BackendError> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.api_key))
            .map_err(|e| BackendError::Transport(format!("bad API key header: {e}")))?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    /// The request body for one prompt.
    pub fn chat_request(&self, request: &RemoteRequest) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(request.system.as_str()),
                ChatMessage::user(request.user.as_str()),
            ],
            temperature: 0.2,
            response_format: Some(ResponseFormat::json_object()),
        }
    }
}

#[async_trait]
impl SemanticBackend for OpenAiBackend {
    async fn complete(&self, request: &RemoteRequest) -> Result<String, BackendError> {
        debug!(model = %self.model, "chat completion request");
        let response = self
            .http
            .post(self.endpoint())
            .headers(self.headers()?)
            .json(&self.chat_request(request))
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let reply: ChatResponse = response
            .json()
            .await
            .map_err(|e| BackendError::Malformed(e.to_string()))?;
        reply.first_content().ok_or(BackendError::EmptyReply)
    }

    fn name(&self) -> &str {
        "openai"
    }
}
