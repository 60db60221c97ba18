//! Configuration types.
//!
//! [`Settings`] is the non-secret part read from the optional TOML file;
//! every field has a default so partial files work. [`ClientConfiguration`]
//! is the resolved, immutable result of settings plus environment.

use std::fmt;

use serde::{Deserialize, Serialize};
use signaledge_common::ConfigError;

use crate::env::{self, EnvSource};
use crate::validation::helpers::validate_http_url;

/// Application identifier sent with every client request.
pub const CLIENT_ID: &str = "SignalEdge";

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_EVENT_API_BASE_URL: &str = "https://inn.gs";
pub const DEFAULT_DEV_SERVER_URL: &str = "http://localhost:8288";

/// Root of the settings file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub gemini: GeminiSettings,
    pub events: EventSettings,
}

/// Gemini request defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiSettings {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
    /// Override for the Generative Language API base URL.
    pub base_url: Option<String>,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_GEMINI_MODEL.to_string(),
            max_tokens: 4096,
            temperature: 0.7,
            base_url: None,
        }
    }
}

/// Event API settings. The event key itself only comes from the environment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventSettings {
    pub base_url: Option<String>,
    pub dev: bool,
}

/// Resolved client configuration.
#[derive(Clone, Serialize)]
pub struct ClientConfiguration {
    pub id: String,
    pub ai: AiOptions,
    pub events: EventOptions,
}

#[derive(Clone, Serialize)]
pub struct AiOptions {
    pub gemini: GeminiOptions,
}

#[derive(Clone, Serialize)]
pub struct GeminiOptions {
    #[serde(serialize_with = "redact")]
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub base_url: Option<String>,
}

#[derive(Clone, Serialize)]
pub struct EventOptions {
    #[serde(serialize_with = "redact_opt")]
    pub event_key: Option<String>,
    pub base_url: String,
    pub dev: bool,
}

fn redact<T, S: serde::Serializer>(_: &T, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str("[REDACTED]")
}

fn redact_opt<S: serde::Serializer>(value: &Option<String>, s: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(_) => s.serialize_some("[REDACTED]"),
        None => s.serialize_none(),
    }
}

impl fmt::Debug for ClientConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfiguration")
            .field("id", &self.id)
            .field("ai", &self.ai)
            .field("events", &self.events)
            .finish()
    }
}

impl fmt::Debug for AiOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AiOptions")
            .field("gemini", &self.gemini)
            .finish()
    }
}

impl fmt::Debug for GeminiOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiOptions")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl fmt::Debug for EventOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventOptions")
            .field("event_key", &self.event_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("dev", &self.dev)
            .finish()
    }
}

impl ClientConfiguration {
    /// Build a configuration with default settings around an explicit key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_settings(api_key, &Settings::default(), None)
    }

    /// Resolve settings and environment into a configuration.
    ///
    /// Fails with `MissingCredential`/`EmptyCredential` when
    /// `GEMINI_API_KEY` is unusable, and with `ValidationError` when an
    /// event API base URL from the environment is not http(s). Environment
    /// values for the event API take precedence over the settings file.
    pub fn resolve(settings: &Settings, env: &impl EnvSource) -> Result<Self, ConfigError> {
        let api_key = env::require(env, env::GEMINI_API_KEY_ENV)?;
        let event_key = env::optional(env, env::INNGEST_EVENT_KEY_ENV);
        let mut config = Self::with_settings(api_key, settings, event_key);

        let dev_var = env::optional(env, env::INNGEST_DEV_ENV);
        let dev_url = dev_var
            .as_deref()
            .filter(|v| v.starts_with("http://") || v.starts_with("https://"))
            .map(|v| v.trim_end_matches('/').to_string());
        if let Some(ref v) = dev_var {
            config.events.dev = dev_url.is_some() || env::flag(v);
        }

        let env_base = [env::INNGEST_EVENT_API_BASE_URL_ENV, env::INNGEST_BASE_URL_ENV]
            .into_iter()
            .find_map(|key| env::optional(env, key).map(|url| (key, url)));
        if let Some((key, ref url)) = env_base {
            let mut errors = Vec::new();
            validate_http_url(&mut errors, key, url);
            if !errors.is_empty() {
                return Err(ConfigError::ValidationError(errors.join("; ")));
            }
        }

        let base_override = env_base.map(|(_, url)| url).or(dev_url);
        match base_override {
            Some(url) => config.events.base_url = url.trim_end_matches('/').to_string(),
            None if settings.events.base_url.is_none() => {
                config.events.base_url = default_event_base_url(config.events.dev).to_string();
            }
            None => {}
        }

        Ok(config)
    }

    fn with_settings(
        api_key: impl Into<String>,
        settings: &Settings,
        event_key: Option<String>,
    ) -> Self {
        let dev = settings.events.dev;
        Self {
            id: CLIENT_ID.to_string(),
            ai: AiOptions {
                gemini: GeminiOptions {
                    api_key: api_key.into(),
                    model: settings.gemini.model.clone(),
                    max_tokens: settings.gemini.max_tokens,
                    temperature: settings.gemini.temperature,
                    base_url: settings.gemini.base_url.clone(),
                },
            },
            events: EventOptions {
                event_key,
                base_url: settings
                    .events
                    .base_url
                    .as_deref()
                    .map(|u| u.trim_end_matches('/').to_string())
                    .unwrap_or_else(|| default_event_base_url(dev).to_string()),
                dev,
            },
        }
    }

    pub fn with_event_key(mut self, key: impl Into<String>) -> Self {
        self.events.event_key = Some(key.into());
        self
    }

    pub fn with_event_base_url(mut self, url: impl Into<String>) -> Self {
        self.events.base_url = url.into();
        self
    }
}

fn default_event_base_url(dev: bool) -> &'static str {
    if dev {
        DEFAULT_DEV_SERVER_URL
    } else {
        DEFAULT_EVENT_API_BASE_URL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn resolve_carries_key_and_fixed_id() {
        let e = env(&[("GEMINI_API_KEY", "sk-test-123")]);
        let config = ClientConfiguration::resolve(&Settings::default(), &e).unwrap();
        assert_eq!(config.ai.gemini.api_key, "sk-test-123");
        assert_eq!(config.id, "SignalEdge");
    }

    #[test]
    fn resolve_does_not_transform_key() {
        for key in ["sk-test-123", "  padded  ", "ünïcödé-κλειδί", "a=b;c"] {
            let e = env(&[("GEMINI_API_KEY", key)]);
            let config = ClientConfiguration::resolve(&Settings::default(), &e).unwrap();
            assert_eq!(config.ai.gemini.api_key, key);
            assert_eq!(config.id, CLIENT_ID);
        }
    }

    #[test]
    fn resolve_without_key_fails() {
        let err = ClientConfiguration::resolve(&Settings::default(), &env(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential(_)));

        let e = env(&[("GEMINI_API_KEY", "")]);
        let err = ClientConfiguration::resolve(&Settings::default(), &e).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyCredential(_)));
    }

    #[test]
    fn resolve_applies_gemini_settings() {
        let settings = Settings {
            gemini: GeminiSettings {
                model: "gemini-1.5-pro".into(),
                max_tokens: 1024,
                temperature: 0.2,
                base_url: None,
            },
            ..Default::default()
        };
        let e = env(&[("GEMINI_API_KEY", "k")]);
        let config = ClientConfiguration::resolve(&settings, &e).unwrap();
        assert_eq!(config.ai.gemini.model, "gemini-1.5-pro");
        assert_eq!(config.ai.gemini.max_tokens, 1024);
        assert_eq!(config.ai.gemini.temperature, 0.2);
    }

    #[test]
    fn event_defaults_to_cloud_api() {
        let e = env(&[("GEMINI_API_KEY", "k")]);
        let config = ClientConfiguration::resolve(&Settings::default(), &e).unwrap();
        assert_eq!(config.events.base_url, DEFAULT_EVENT_API_BASE_URL);
        assert!(!config.events.dev);
        assert!(config.events.event_key.is_none());
    }

    #[test]
    fn dev_flag_switches_to_dev_server() {
        let e = env(&[("GEMINI_API_KEY", "k"), ("INNGEST_DEV", "1")]);
        let config = ClientConfiguration::resolve(&Settings::default(), &e).unwrap();
        assert!(config.events.dev);
        assert_eq!(config.events.base_url, DEFAULT_DEV_SERVER_URL);
    }

    #[test]
    fn dev_url_sets_base() {
        let e = env(&[
            ("GEMINI_API_KEY", "k"),
            ("INNGEST_DEV", "http://127.0.0.1:9999/"),
        ]);
        let config = ClientConfiguration::resolve(&Settings::default(), &e).unwrap();
        assert!(config.events.dev);
        assert_eq!(config.events.base_url, "http://127.0.0.1:9999");
    }

    #[test]
    fn event_api_base_takes_precedence() {
        let e = env(&[
            ("GEMINI_API_KEY", "k"),
            ("INNGEST_BASE_URL", "https://base.example.com"),
            ("INNGEST_EVENT_API_BASE_URL", "https://events.example.com/"),
        ]);
        let config = ClientConfiguration::resolve(&Settings::default(), &e).unwrap();
        assert_eq!(config.events.base_url, "https://events.example.com");
    }

    #[test]
    fn env_base_url_must_be_http() {
        let e = env(&[("GEMINI_API_KEY", "k"), ("INNGEST_BASE_URL", "inn.gs")]);
        let err = ClientConfiguration::resolve(&Settings::default(), &e).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(ref msg) if msg.contains("INNGEST_BASE_URL")));

        let e = env(&[
            ("GEMINI_API_KEY", "k"),
            ("INNGEST_EVENT_API_BASE_URL", "ftp://events.example.com"),
        ]);
        let err = ClientConfiguration::resolve(&Settings::default(), &e).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(ref msg) if msg.contains("INNGEST_EVENT_API_BASE_URL")));
    }

    #[test]
    fn settings_base_url_used_without_env_override() {
        let settings = Settings {
            events: EventSettings {
                base_url: Some("https://self-hosted.example.com/".into()),
                dev: false,
            },
            ..Default::default()
        };
        let e = env(&[("GEMINI_API_KEY", "k")]);
        let config = ClientConfiguration::resolve(&settings, &e).unwrap();
        assert_eq!(config.events.base_url, "https://self-hosted.example.com");
    }

    #[test]
    fn event_key_read_from_env() {
        let e = env(&[("GEMINI_API_KEY", "k"), ("INNGEST_EVENT_KEY", "evt-key")]);
        let config = ClientConfiguration::resolve(&Settings::default(), &e).unwrap();
        assert_eq!(config.events.event_key.as_deref(), Some("evt-key"));
    }

    #[test]
    fn debug_redacts_secrets() {
        let config = ClientConfiguration::new("sk-secret-value").with_event_key("evt-secret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-secret-value"));
        assert!(!debug.contains("evt-secret"));
        assert!(debug.contains("[REDACTED]"));
        assert!(debug.contains("SignalEdge"));
    }

    #[test]
    fn json_redacts_secrets() {
        let config = ClientConfiguration::new("sk-secret-value").with_event_key("evt-secret");
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("sk-secret-value"));
        assert!(!json.contains("evt-secret"));
        assert!(json.contains("\"api_key\":\"[REDACTED]\""));
    }

    #[test]
    fn settings_default_is_partial_toml_friendly() {
        let settings: Settings = toml::from_str("[gemini]\nmodel = \"x\"\n").unwrap();
        assert_eq!(settings.gemini.model, "x");
        assert_eq!(settings.gemini.max_tokens, 4096);
        assert!(!settings.events.dev);
    }
}
