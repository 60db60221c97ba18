//! The orchestration client.

use std::time::Duration;

use signaledge_ai::{AiClient, AiResponse, GeminiClient, GeminiConfig, Message, ToolDefinition};
use signaledge_common::{new_correlation_id, EventId};
use signaledge_config::{ClientConfiguration, EnvSource, Settings};
use tracing::{debug, info};

use crate::events::{self, Event, SendEventResponse};
use crate::ClientError;

/// A configured client. Immutable once built; share it as a
/// [`ClientHandle`](crate::ClientHandle).
pub struct Client {
    config: ClientConfiguration,
    gemini: GeminiClient,
    http: reqwest::Client,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Build a client from a resolved configuration. Opens no connections.
    pub fn new(config: ClientConfiguration) -> Result<Self, ClientError> {
        let gemini = GeminiClient::new(gemini_config(&config))?;
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ClientError::Http(e.to_string()))?;

        info!(id = %config.id, model = %config.ai.gemini.model, "client constructed");
        Ok(Self {
            config,
            gemini,
            http,
        })
    }

    /// Resolve `settings` against `env` and build a client.
    pub fn from_env(settings: &Settings, env: &impl EnvSource) -> Result<Self, ClientError> {
        Self::new(ClientConfiguration::resolve(settings, env)?)
    }

    pub fn id(&self) -> &str {
        &self.config.id
    }

    pub fn config(&self) -> &ClientConfiguration {
        &self.config
    }

    /// Gemini client configured with the provider key.
    pub fn ai(&self) -> &GeminiClient {
        &self.gemini
    }

    /// Run one inference against Gemini.
    pub async fn infer(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
    ) -> Result<AiResponse, ClientError> {
        Ok(self.gemini.send_message(messages, tools).await?)
    }

    /// Run one streaming inference, calling `on_chunk` with each text delta.
    pub async fn infer_streaming(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
        on_chunk: Box<dyn Fn(String) + Send + Sync>,
    ) -> Result<AiResponse, ClientError> {
        Ok(self
            .gemini
            .send_message_streaming(messages, tools, on_chunk)
            .await?)
    }

    /// Publish events, returning the ids the event API assigned.
    pub async fn send(&self, events: &[Event]) -> Result<Vec<EventId>, ClientError> {
        let url = events::event_url(&self.config.events)?;
        let payload = events::prepare(events, chrono::Utc::now().timestamp_millis())?;

        let correlation = new_correlation_id();
        debug!(
            %correlation,
            count = payload.len(),
            base_url = %self.config.events.base_url,
            "sending events"
        );

        let response = self
            .http
            .post(&url)
            .header("content-type", "application/json")
            .header("user-agent", concat!("signaledge/", env!("CARGO_PKG_VERSION")))
            .json(&payload)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.without_url().to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ClientError::Network(e.without_url().to_string()))?;

        if !status.is_success() {
            let detail = serde_json::from_str::<SendEventResponse>(&text)
                .ok()
                .and_then(|r| r.error)
                .unwrap_or(text);
            return Err(ClientError::Api(format!("HTTP {status}: {detail}")));
        }

        let parsed: SendEventResponse = serde_json::from_str(&text)
            .map_err(|e| ClientError::Api(format!("unexpected response body: {e}")))?;
        if let Some(error) = parsed.error {
            return Err(ClientError::Api(error));
        }

        debug!(%correlation, ids = parsed.ids.len(), "events accepted");
        Ok(parsed.ids)
    }
}

fn gemini_config(config: &ClientConfiguration) -> GeminiConfig {
    let options = &config.ai.gemini;
    let gemini = GeminiConfig::new(options.api_key.clone())
        .with_model(options.model.clone())
        .with_max_tokens(options.max_tokens)
        .with_temperature(options.temperature);
    match options.base_url {
        Some(ref url) => gemini.with_base_url(url.clone()),
        None => gemini,
    }
}
