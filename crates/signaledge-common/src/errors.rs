use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing credential: environment variable {0} is not set")]
    MissingCredential(String),

    #[error("missing credential: environment variable {0} is set but empty")]
    EmptyCredential(String),

    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

impl ConfigError {
    /// True for both the unset and the empty credential cases.
    pub fn is_missing_credential(&self) -> bool {
        matches!(
            self,
            ConfigError::MissingCredential(_) | ConfigError::EmptyCredential(_)
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SignalEdgeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("network error: {0}")]
    Network(String),

    #[error("ai error: {0}")]
    Ai(String),

    #[error("client error: {0}")]
    Client(String),

    #[error("{0}")]
    Other(String),
}
