mod sse;
mod types;

use std::pin::Pin;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use reqwest::{Client, Response, StatusCode};
use tracing::debug;

use crate::config::RuntimeSettings;

pub use types::{
    ChatChoice, ChatCompletionChunk, ChatCompletionRequest, ChatCompletionResponse, ChatMessage,
    ChatMessageRole, ChunkChoice, ChunkDelta, FunctionCall, FunctionCallDelta,
    FunctionDefinition, RunIntrospection, ToolCall, ToolCallDelta, ToolDefinition,
};

pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<ChatCompletionChunk>> + Send>>;

/// Narrow interface to the hosted agent runtime.
#[async_trait]
pub trait AgentRuntime: Send + Sync {
    async fn chat_completion(&self, request: ChatCompletionRequest)
    -> Result<ChatCompletionResponse>;

    async fn chat_completion_stream(&self, request: ChatCompletionRequest) -> Result<ChunkStream>;
}

pub type DynAgentRuntime = dyn AgentRuntime;

#[derive(Debug, Clone)]
pub struct RuntimeClient {
    http: Client,
    base_url: String,
    api_key: String,
    user_agent: String,
}

impl RuntimeClient {
    pub fn new(settings: &RuntimeSettings) -> Result<Self> {
        let base_url = settings.base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(anyhow!("Base URL cannot be empty"));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url,
            api_key: settings.api_key.clone(),
            user_agent: settings.user_agent.clone(),
        })
    }

    async fn send(&self, request: &ChatCompletionRequest) -> Result<Response> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        debug!(
            model = %request.model,
            messages = request.messages.len(),
            tools = request.tools.len(),
            stream = request.stream,
            "sending chat completion request"
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("User-Agent", &self.user_agent)
            .json(request)
            .send()
            .await
            .context("Failed to send request to chat completions endpoint")?;

        check_status(response).await
    }
}

#[async_trait]
impl AgentRuntime for RuntimeClient {
    async fn chat_completion(
        &self,
        mut request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        request.stream = false;
        let response = self.send(&request).await?;
        response
            .json::<ChatCompletionResponse>()
            .await
            .context("Failed to parse chat completion response JSON")
    }

    async fn chat_completion_stream(
        &self,
        mut request: ChatCompletionRequest,
    ) -> Result<ChunkStream> {
        request.stream = true;
        let response = self.send(&request).await?;

        let chunks = sse::data_lines(response.bytes_stream()).map(|line| {
            let line = line.context("Failed to read streamed response")?;
            serde_json::from_str::<ChatCompletionChunk>(&line)
                .with_context(|| format!("Failed to parse streamed chunk: {line}"))
        });

        Ok(Box::pin(chunks))
    }
}

async fn check_status(response: Response) -> Result<Response> {
    match response.status() {
        StatusCode::OK => Ok(response),
        StatusCode::TOO_MANY_REQUESTS => {
            let error_text = response.text().await.unwrap_or_default();
            Err(anyhow!(
                "Rate limit exceeded. Please wait a moment and try again. (API response: {})",
                error_text
            ))
        }
        StatusCode::UNAUTHORIZED => Err(anyhow!(
            "Invalid API key. Please check your API key configuration."
        )),
        StatusCode::BAD_REQUEST => {
            let error_text = response.text().await.unwrap_or_default();
            Err(anyhow!("Invalid request: {}", error_text))
        }
        StatusCode::INTERNAL_SERVER_ERROR | StatusCode::SERVICE_UNAVAILABLE => Err(anyhow!(
            "Runtime service is temporarily unavailable. Please try again later."
        )),
        status => {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(anyhow!(
                "Runtime API error (status {}): {}",
                status,
                error_text
            ))
        }
    }
}

#[cfg(test)]
mod tests;
