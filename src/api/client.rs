use crate::config::ApiConfig;
use crate::types::{AGENT_ID, ChatReply, ChatRequest, HistoryRecord};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

// ============================================
// Error Types
// ============================================

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

// ============================================
// Backend Contract
// ============================================

/// The two calls the console makes against the agent service.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait AgentApi {
    async fn send_chat(&self, message: &str) -> ApiResult<ChatReply>;

    async fn fetch_history(&self) -> ApiResult<Vec<HistoryRecord>>;
}

/// Cheaply cloneable handle shared with the panels through the UI context.
#[derive(Clone)]
pub struct AgentHandle(Arc<dyn AgentApi>);

impl AgentHandle {
    pub fn new(api: impl AgentApi + 'static) -> Self {
        Self(Arc::new(api))
    }

    pub fn api(&self) -> &dyn AgentApi {
        self.0.as_ref()
    }
}

// ============================================
// HTTP Implementation
// ============================================

pub struct HttpAgentClient {
    client: reqwest::Client,
    config: ApiConfig,
}

impl HttpAgentClient {
    pub fn new(config: ApiConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    /// Use a preconfigured client (proxy settings, custom TLS roots).
    pub fn with_client(config: ApiConfig, client: reqwest::Client) -> Self {
        Self { client, config }
    }
}

/// Any non-2xx status is a failure; the body is kept for the log line.
async fn decode_success<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(ApiError::Status { status, body });
    }
    Ok(serde_json::from_str(&body)?)
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl AgentApi for HttpAgentClient {
    async fn send_chat(&self, message: &str) -> ApiResult<ChatReply> {
        let url = self.config.chat_url().clone();
        debug!(%url, chars = message.chars().count(), "sending chat message");
        let response = self
            .client
            .post(url)
            .json(&ChatRequest {
                message,
                agent_id: AGENT_ID,
            })
            .send()
            .await?;
        decode_success(response).await
    }

    async fn fetch_history(&self) -> ApiResult<Vec<HistoryRecord>> {
        let url = self.config.history_url().clone();
        debug!(%url, "fetching chat history");
        let response = self.client.get(url).send().await?;
        let records: Vec<HistoryRecord> = decode_success(response).await?;
        debug!(count = records.len(), "chat history loaded");
        Ok(records)
    }
}
