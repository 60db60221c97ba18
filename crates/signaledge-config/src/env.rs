//! Validated access to process environment variables.
//!
//! Lookups go through [`EnvSource`] so startup code reads the real
//! process environment while tests hand in a plain map.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use signaledge_common::ConfigError;
use tracing::debug;

/// Gemini provider credential. Required.
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";
/// Key used to publish events to the event API.
pub const INNGEST_EVENT_KEY_ENV: &str = "INNGEST_EVENT_KEY";
/// Base URL for every Inngest API, used when no event-specific base is set.
pub const INNGEST_BASE_URL_ENV: &str = "INNGEST_BASE_URL";
/// Base URL for the event API only.
pub const INNGEST_EVENT_API_BASE_URL_ENV: &str = "INNGEST_EVENT_API_BASE_URL";
/// `1`/`true`/`yes` or a dev server URL.
pub const INNGEST_DEV_ENV: &str = "INNGEST_DEV";
/// Explicit settings file path.
pub const SIGNALEDGE_CONFIG_ENV: &str = "SIGNALEDGE_CONFIG";

/// A source of environment variables.
pub trait EnvSource {
    /// Raw value of `key`, or `None` if unset.
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<E: EnvSource + ?Sized> EnvSource for &E {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }
}

/// Read a required credential.
///
/// The value is returned exactly as set, whitespace included. Unset
/// variables yield `MissingCredential`; the empty string yields
/// `EmptyCredential`.
pub fn require(env: &impl EnvSource, key: &str) -> Result<String, ConfigError> {
    match env.var(key) {
        None => Err(ConfigError::MissingCredential(key.to_string())),
        Some(value) if value.is_empty() => Err(ConfigError::EmptyCredential(key.to_string())),
        Some(value) => Ok(value),
    }
}

/// Read an optional variable, treating empty values as unset.
pub fn optional(env: &impl EnvSource, key: &str) -> Option<String> {
    env.var(key).filter(|v| !v.trim().is_empty())
}

/// Interpret a boolean-ish flag such as `INNGEST_DEV=1`.
pub fn flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Load a `.env` file from the working directory (or a parent).
///
/// Variables already present in the process environment are not
/// overridden. Returns the path that was loaded, or `None` when there is
/// no `.env` file. A file that exists but cannot be read or parsed is an
/// error; the caller reports it once logging is up.
pub fn load_dotenv() -> Result<Option<PathBuf>, ConfigError> {
    dotenv_outcome(dotenvy::dotenv(), Path::new(".env"))
}

/// Load a specific `.env`-style file. Same rules as [`load_dotenv`].
pub fn load_dotenv_from(path: &Path) -> Result<Option<PathBuf>, ConfigError> {
    dotenv_outcome(dotenvy::from_path(path).map(|()| path.to_path_buf()), path)
}

fn dotenv_outcome(
    result: Result<PathBuf, dotenvy::Error>,
    path: &Path,
) -> Result<Option<PathBuf>, ConfigError> {
    match result {
        Ok(path) => {
            debug!("loaded environment from {}", path.display());
            Ok(Some(path))
        }
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(ConfigError::ParseError(format!(
            "failed to load {}: {e}",
            path.display()
        ))),
    }
}
