//! Core TOML settings loading: read from path or platform default.

use crate::env::{self, EnvSource};
use crate::schema::Settings;
use signaledge_common::ConfigError;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::paths::default_config_path;

/// Load settings from a specific TOML file path.
///
/// Missing fields take serde defaults. A file that does not exist is
/// `FileNotFound`.
pub fn load_from_path(path: &Path) -> Result<Settings, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }
        Err(e) => {
            return Err(ConfigError::ParseError(format!(
                "failed to read {}: {e}",
                path.display()
            )));
        }
    };

    let settings: Settings = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    info!("loaded settings from {}", path.display());
    Ok(settings)
}

/// Load settings from the platform-specific default path.
///
/// On macOS: `~/Library/Application Support/signaledge/config.toml`
/// On Linux: `~/.config/signaledge/config.toml`
///
/// A missing file yields defaults; nothing is written.
pub fn load_default() -> Result<Settings, ConfigError> {
    let path = default_config_path()?;

    match load_from_path(&path) {
        Ok(settings) => Ok(settings),
        Err(ConfigError::FileNotFound(_)) => {
            debug!("no settings file at {}, using defaults", path.display());
            Ok(Settings::default())
        }
        Err(e) => Err(e),
    }
}

/// A settings file the user named, via `explicit` or `$SIGNALEDGE_CONFIG`.
fn named_path(explicit: Option<&Path>, env: &impl EnvSource) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| env::optional(env, env::SIGNALEDGE_CONFIG_ENV).map(PathBuf::from))
}

/// The settings file path in effect: `explicit`, then `$SIGNALEDGE_CONFIG`,
/// then the platform default.
pub fn settings_path(explicit: Option<&Path>, env: &impl EnvSource) -> Result<PathBuf, ConfigError> {
    match named_path(explicit, env) {
        Some(path) => Ok(path),
        None => default_config_path(),
    }
}

/// Load settings from the path [`settings_path`] picks.
///
/// A named file must exist; only the platform default may be absent.
pub fn load_settings(
    explicit: Option<&Path>,
    env: &impl EnvSource,
) -> Result<Settings, ConfigError> {
    match named_path(explicit, env) {
        Some(path) => load_from_path(&path),
        None => load_default(),
    }
}
