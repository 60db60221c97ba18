//! Gemini API client struct, request building, and response parsing.

use std::time::Duration;

use crate::tools::to_gemini_tool;
use crate::{AiError, AiResponse, Message, Role, TokenUsage, ToolCall, ToolDefinition};

use super::config::GeminiConfig;

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini API client.
pub struct GeminiClient {
    pub(crate) config: GeminiConfig,
    pub(crate) http: reqwest::Client,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Build a client. No request is made until a message is sent.
    pub fn new(config: GeminiConfig) -> Result<Self, AiError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| AiError::NetworkError(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    pub(crate) fn api_url(&self, stream: bool) -> String {
        let method = if stream {
            "streamGenerateContent"
        } else {
            "generateContent"
        };
        let base = self
            .config
            .base_url
            .as_deref()
            .unwrap_or(GEMINI_API_BASE)
            .trim_end_matches('/');
        format!("{}/{}:{}", base, self.config.model, method)
    }

    /// Build the JSON request body for the Gemini API.
    pub(crate) fn build_request_body(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
    ) -> serde_json::Value {
        let mut contents = Vec::new();

        for msg in messages {
            let role = match msg.role {
                Role::User | Role::Tool => "user",
                Role::Assistant => "model",
                Role::System => continue, // handled via systemInstruction
            };
            contents.push(serde_json::json!({
                "role": role,
                "parts": [{ "text": msg.content }]
            }));
        }

        let mut body = serde_json::json!({
            "contents": contents,
            "generationConfig": {
                "maxOutputTokens": self.config.max_tokens,
                "temperature": self.config.temperature,
            }
        });

        if let Some(system) = messages.iter().find(|m| m.role == Role::System) {
            body["systemInstruction"] = serde_json::json!({
                "parts": [{ "text": system.content }]
            });
        }

        if !tools.is_empty() {
            let tool_defs: Vec<_> = tools.iter().map(to_gemini_tool).collect();
            body["tools"] = serde_json::json!([{
                "functionDeclarations": tool_defs
            }]);
        }

        body
    }

    /// Parse a Gemini response.
    pub(crate) fn parse_response(&self, json: serde_json::Value) -> Result<AiResponse, AiError> {
        let candidates = json["candidates"]
            .as_array()
            .ok_or_else(|| AiError::ParseError("no candidates in response".to_string()))?;

        let first = candidates
            .first()
            .ok_or_else(|| AiError::ParseError("empty candidates".to_string()))?;

        let mut acc = StreamAccumulator::default();
        acc.push_parts(&first["content"]["parts"]);
        acc.push_usage(&json["usageMetadata"]);
        Ok(acc.finish())
    }
}

/// Collects text, function calls and usage across response chunks.
#[derive(Debug, Default)]
pub(crate) struct StreamAccumulator {
    content: String,
    tool_calls: Vec<ToolCall>,
    usage: TokenUsage,
}

impl StreamAccumulator {
    /// Apply one streamed JSON chunk, returning the new text it carried.
    pub(crate) fn push_chunk(&mut self, data: &serde_json::Value) -> String {
        let before = self.content.len();
        if let Some(candidates) = data["candidates"].as_array() {
            for candidate in candidates {
                self.push_parts(&candidate["content"]["parts"]);
            }
        }
        if let Some(meta) = data.get("usageMetadata") {
            self.push_usage(meta);
        }
        self.content[before..].to_string()
    }

    fn push_parts(&mut self, parts: &serde_json::Value) {
        let Some(parts) = parts.as_array() else {
            return;
        };
        for part in parts {
            if let Some(text) = part["text"].as_str() {
                self.content.push_str(text);
            }
            if let Some(fc) = part.get("functionCall") {
                self.tool_calls.push(ToolCall {
                    id: uuid::Uuid::new_v4().to_string(),
                    name: fc["name"].as_str().unwrap_or("").to_string(),
                    arguments: fc["args"].clone(),
                });
            }
        }
    }

    fn push_usage(&mut self, meta: &serde_json::Value) {
        if meta.is_null() {
            return;
        }
        self.usage.input_tokens = meta["promptTokenCount"].as_u64().unwrap_or(0);
        self.usage.output_tokens = meta["candidatesTokenCount"].as_u64().unwrap_or(0);
    }

    pub(crate) fn finish(self) -> AiResponse {
        AiResponse {
            content: self.content,
            tool_calls: self.tool_calls,
            usage: self.usage,
        }
    }
}
