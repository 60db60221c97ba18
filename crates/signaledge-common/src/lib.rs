pub mod errors;
pub mod id;

pub use errors::{ConfigError, SignalEdgeError};
pub use id::{new_correlation_id, EventId};

pub type Result<T> = std::result::Result<T, SignalEdgeError>;
