//! Tests for TOML settings loading, creation, and path resolution.

use super::*;
use crate::schema::{Settings, DEFAULT_GEMINI_MODEL};
use std::collections::HashMap;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let result = load_from_path(Path::new("/tmp/nonexistent_signaledge_config.toml"));
    let err = result.unwrap_err();
    assert!(matches!(err, signaledge_common::ConfigError::FileNotFound(_)));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[gemini]
model = "gemini-1.5-flash"
temperature = 0.1
"#,
    )
    .unwrap();

    let settings = load_from_path(&path).unwrap();
    assert_eq!(settings.gemini.model, "gemini-1.5-flash");
    assert_eq!(settings.gemini.temperature, 0.1);
    // Defaults preserved
    assert_eq!(settings.gemini.max_tokens, 4096);
    assert!(settings.events.base_url.is_none());
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let err = load_from_path(&path).unwrap_err();
    assert!(matches!(err, signaledge_common::ConfigError::ParseError(_)));
}

#[test]
fn create_and_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("signaledge").join("config.toml");

    assert!(create_default_config(&path).unwrap());
    assert!(path.exists());

    let settings = load_from_path(&path).unwrap();
    assert_eq!(settings, Settings::default());
}

#[test]
fn create_default_config_keeps_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[gemini]\nmodel = \"custom\"\n").unwrap();

    assert!(!create_default_config(&path).unwrap());
    let settings = load_from_path(&path).unwrap();
    assert_eq!(settings.gemini.model, "custom");
}

#[test]
fn default_config_toml_is_valid() {
    use super::template::default_config_toml;

    let settings: Settings = toml::from_str(default_config_toml()).unwrap();
    assert_eq!(settings.gemini.model, DEFAULT_GEMINI_MODEL);
}

#[test]
fn load_settings_prefers_explicit_path() {
    let dir = tempfile::tempdir().unwrap();
    let explicit = dir.path().join("explicit.toml");
    let from_env = dir.path().join("env.toml");
    std::fs::write(&explicit, "[gemini]\nmodel = \"explicit\"\n").unwrap();
    std::fs::write(&from_env, "[gemini]\nmodel = \"env\"\n").unwrap();

    let mut env = HashMap::new();
    env.insert(
        "SIGNALEDGE_CONFIG".to_string(),
        from_env.display().to_string(),
    );

    let settings = load_settings(Some(explicit.as_path()), &env).unwrap();
    assert_eq!(settings.gemini.model, "explicit");

    let settings = load_settings(None, &env).unwrap();
    assert_eq!(settings.gemini.model, "env");
}

#[test]
fn load_settings_missing_env_path_is_error() {
    let mut env = HashMap::new();
    env.insert(
        "SIGNALEDGE_CONFIG".to_string(),
        "/tmp/definitely_missing_signaledge.toml".to_string(),
    );
    let err = load_settings(None, &env).unwrap_err();
    assert!(matches!(err, signaledge_common::ConfigError::FileNotFound(_)));
}

#[test]
fn settings_path_follows_load_order() {
    let dir = tempfile::tempdir().unwrap();
    let explicit = dir.path().join("explicit.toml");
    let from_env = dir.path().join("env.toml");

    let mut env = HashMap::new();
    env.insert(
        "SIGNALEDGE_CONFIG".to_string(),
        from_env.display().to_string(),
    );

    assert_eq!(settings_path(Some(explicit.as_path()), &env).unwrap(), explicit);
    assert_eq!(settings_path(None, &env).unwrap(), from_env);

    let empty = HashMap::<String, String>::new();
    if let Ok(default) = default_config_path() {
        assert_eq!(settings_path(None, &empty).unwrap(), default);
    }
}

#[test]
fn file_created_at_env_path_is_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let from_env = dir.path().join("nested").join("signaledge.toml");

    let mut env = HashMap::new();
    env.insert(
        "SIGNALEDGE_CONFIG".to_string(),
        from_env.display().to_string(),
    );

    let path = settings_path(None, &env).unwrap();
    assert!(create_default_config(&path).unwrap());
    assert_eq!(load_settings(None, &env).unwrap(), Settings::default());
}

#[test]
fn default_config_path_is_reasonable() {
    // This may not work in all CI environments, but should work locally
    if let Ok(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(path_str.contains("signaledge"));
        assert!(path_str.ends_with("config.toml"));
    }
}
