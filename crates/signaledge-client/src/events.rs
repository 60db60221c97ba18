//! Event payloads and the event API request shape.
//!
//! Events are posted as a JSON array to `{base}/e/{event_key}`. The API
//! answers with the ids it assigned, in request order.

use serde::{Deserialize, Serialize};
use signaledge_common::EventId;
use signaledge_config::schema::EventOptions;

use crate::ClientError;

/// Placeholder key accepted by the local dev server.
pub const DEV_EVENT_KEY: &str = "NO_EVENT_KEY_SET";

/// An event to publish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    #[serde(default)]
    pub data: serde_json::Value,
    /// Idempotency id. Events sharing an id are deduplicated upstream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Milliseconds since the Unix epoch. Filled in at send time if absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ts: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v: Option<String>,
}

impl Event {
    pub fn new(name: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            data,
            id: None,
            ts: None,
            user: None,
            v: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_ts(mut self, ts: i64) -> Self {
        self.ts = Some(ts);
        self
    }
}

/// Body returned by the event API.
#[derive(Debug, Clone, Deserialize)]
pub struct SendEventResponse {
    #[serde(default)]
    pub ids: Vec<EventId>,
    #[serde(default)]
    pub status: u16,
    #[serde(default)]
    pub error: Option<String>,
}

/// URL events are posted to. Contains the event key, so never log it.
pub(crate) fn event_url(options: &EventOptions) -> Result<String, ClientError> {
    let key = match (&options.event_key, options.dev) {
        (Some(key), _) => key.as_str(),
        (None, true) => DEV_EVENT_KEY,
        (None, false) => return Err(ClientError::MissingEventKey),
    };
    Ok(format!(
        "{}/e/{}",
        options.base_url.trim_end_matches('/'),
        key
    ))
}

/// Validate events and stamp missing timestamps with `now_ms`.
pub(crate) fn prepare(events: &[Event], now_ms: i64) -> Result<Vec<Event>, ClientError> {
    if events.is_empty() {
        return Err(ClientError::InvalidEvent("no events to send".to_string()));
    }

    events
        .iter()
        .enumerate()
        .map(|(i, event)| {
            if event.name.trim().is_empty() {
                return Err(ClientError::InvalidEvent(format!(
                    "event {i} has an empty name"
                )));
            }
            let mut event = event.clone();
            if event.data.is_null() {
                event.data = serde_json::json!({});
            }
            event.ts.get_or_insert(now_ms);
            Ok(event)
        })
        .collect()
}
