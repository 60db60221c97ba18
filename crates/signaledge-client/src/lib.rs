//! SignalEdge orchestration client.
//!
//! One [`Client`] per process, identified as `SignalEdge` and configured
//! with the Gemini key from `GEMINI_API_KEY`. Startup code builds it
//! explicitly with [`init`] or [`init_from_env`]; the rest of the
//! application reaches it through [`get_client`] or by passing the
//! [`ClientHandle`] along.
//!
//! ```rust,no_run
//! use signaledge_client::{get_client, init_from_env};
//! use signaledge_config::ProcessEnv;
//!
//! let client = init_from_env(None, &ProcessEnv)?;
//! assert_eq!(client.id(), "SignalEdge");
//! assert!(std::sync::Arc::ptr_eq(&client, &get_client()?));
//! # Ok::<(), signaledge_client::ClientError>(())
//! ```

mod cell;
mod client;
mod error;
pub mod events;

pub use cell::{get_client, init, init_from_env, ClientCell, ClientHandle};
pub use client::Client;
pub use error::ClientError;
pub use events::{Event, SendEventResponse};
