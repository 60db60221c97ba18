//! SignalEdge configuration.
//!
//! Resolves the client configuration from an optional TOML settings file
//! and the process environment. The Gemini credential is required and is
//! only ever read from the environment.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use signaledge_config::{env::ProcessEnv, load_config, config_to_json};
//!
//! let config = load_config(None, &ProcessEnv).expect("GEMINI_API_KEY must be set");
//! println!("{}", config_to_json(&config));
//! ```

pub mod env;
pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use env::{EnvSource, ProcessEnv};
pub use schema::{ClientConfiguration, Settings, CLIENT_ID};

use signaledge_common::ConfigError;
use std::path::Path;

/// Load settings, validate them, and resolve them against `env`.
///
/// `settings_path` overrides `$SIGNALEDGE_CONFIG` and the platform default.
pub fn load_config(
    settings_path: Option<&Path>,
    env: &impl EnvSource,
) -> Result<ClientConfiguration, ConfigError> {
    let settings = toml_loader::load_settings(settings_path, env)?;
    validation::validate(&settings)?;
    let config = ClientConfiguration::resolve(&settings, env)?;
    tracing::info!(
        id = %config.id,
        model = %config.ai.gemini.model,
        dev = config.events.dev,
        "client configuration resolved"
    );
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string with secrets redacted.
pub fn config_to_json(config: &ClientConfiguration) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
