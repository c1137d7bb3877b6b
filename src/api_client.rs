// src/api_client.rs - JSON client for the advisory chat backend
use std::time::Instant;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error};
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{ChatMessage, ChatRequest, ChatResponse, OnboardRequest, OnboardResponse};

/// The three backend calls the widget makes. Implementations must be shareable
/// with the detached history-sync task.
#[async_trait]
pub trait ChatApi: Send + Sync {
    async fn onboard(&self, request: &OnboardRequest) -> Result<OnboardResponse, ApiError>;

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError>;

    async fn save_history(&self, session_id: &str, messages: &[ChatMessage]) -> Result<(), ApiError>;
}

#[derive(Debug, Clone)]
pub struct HttpChatApi {
    client: Client,
    base_url: String,
}

impl HttpChatApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn history_url(&self, session_id: &str) -> String {
        format!(
            "{}/api/chat-history/{}",
            self.base_url,
            urlencoding::encode(session_id)
        )
    }

    async fn post_json<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<Response, ApiError> {
        let request_id = Uuid::new_v4();
        let start = Instant::now();
        debug!(request_id = %request_id, url = %url, "sending request");

        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!(request_id = %request_id, url = %url, error = %e, "request failed");
                ApiError::Transport(e)
            })?;

        let status = response.status();
        debug!(
            request_id = %request_id,
            url = %url,
            status = %status.as_u16(),
            duration_ms = %start.elapsed().as_millis(),
            "response received"
        );

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                detail: extract_detail(&body),
            });
        }

        Ok(response)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Pulls a string `detail` out of an error body, if there is one.
fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("detail")?.as_str().map(|s| s.to_string())
}

#[async_trait]
impl ChatApi for HttpChatApi {
    async fn onboard(&self, request: &OnboardRequest) -> Result<OnboardResponse, ApiError> {
        let url = format!("{}/api/onboard", self.base_url);
        let response = self.post_json(&url, request).await?;
        decode(response).await
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError> {
        let url = format!("{}/api/chat", self.base_url);
        let response = self.post_json(&url, request).await?;
        decode(response).await
    }

    async fn save_history(&self, session_id: &str, messages: &[ChatMessage]) -> Result<(), ApiError> {
        let url = self.history_url(session_id);
        self.post_json(&url, messages).await?;
        Ok(())
    }
}
