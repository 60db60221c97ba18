use signaledge_ai::AiError;
use signaledge_common::{ConfigError, SignalEdgeError};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Ai(#[from] AiError),

    #[error("client already initialized")]
    AlreadyInitialized,

    #[error("client not initialized")]
    NotInitialized,

    #[error("no event key configured; set INNGEST_EVENT_KEY or enable dev mode")]
    MissingEventKey,

    #[error("invalid event: {0}")]
    InvalidEvent(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("event API error: {0}")]
    Api(String),

    #[error("http client error: {0}")]
    Http(String),
}

impl From<ClientError> for SignalEdgeError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Config(e) => SignalEdgeError::Config(e),
            ClientError::Ai(e) => SignalEdgeError::Ai(e.to_string()),
            ClientError::Network(msg) => SignalEdgeError::Network(msg),
            other => SignalEdgeError::Client(other.to_string()),
        }
    }
}
