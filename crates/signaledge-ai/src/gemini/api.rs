//! AiClient trait implementation for GeminiClient (send_message + streaming).

use async_trait::async_trait;
use tracing::debug;

use crate::streaming::{parse_sse_stream, SseEvent};
use crate::{AiClient, AiError, AiResponse, Message, ToolDefinition};

use super::client::{GeminiClient, StreamAccumulator};

impl GeminiClient {
    async fn post(&self, url: &str, body: &serde_json::Value) -> Result<reqwest::Response, AiError> {
        let response = self
            .http
            .post(url)
            .header("content-type", "application/json")
            .header("x-goog-api-key", &self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AiError::Timeout
                } else {
                    AiError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AiError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AiError::ApiError(format!("HTTP {status}: {text}")));
        }
        Ok(response)
    }
}

#[async_trait]
impl AiClient for GeminiClient {
    async fn send_message(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
    ) -> Result<AiResponse, AiError> {
        let body = self.build_request_body(messages, tools);
        let url = self.api_url(false);

        debug!(model = %self.config.model, "Gemini API request");

        let json: serde_json::Value = self
            .post(&url, &body)
            .await?
            .json()
            .await
            .map_err(|e| AiError::ParseError(e.to_string()))?;

        self.parse_response(json)
    }

    async fn send_message_streaming(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
        on_chunk: Box<dyn Fn(String) + Send + Sync>,
    ) -> Result<AiResponse, AiError> {
        let body = self.build_request_body(messages, tools);
        let url = format!("{}?alt=sse", self.api_url(true));

        debug!(model = %self.config.model, "Gemini API streaming request");

        let response = self.post(&url, &body).await?;
        let mut acc = StreamAccumulator::default();

        parse_sse_stream(response, |event: SseEvent| {
            if let Ok(data) = serde_json::from_str::<serde_json::Value>(&event.data) {
                let chunk = acc.push_chunk(&data);
                if !chunk.is_empty() {
                    on_chunk(chunk);
                }
            }
        })
        .await?;

        Ok(acc.finish())
    }
}
