//! Once-initialized storage for the shared client handle.
//!
//! [`ClientCell`] can be owned by whatever needs it (tests, an embedding
//! application). The process-wide cell behind [`init`] and [`get_client`]
//! is filled explicitly during startup.

use std::path::Path;
use std::sync::{Arc, Mutex, OnceLock};

use signaledge_config::EnvSource;
use tracing::info;

use crate::{Client, ClientError};

/// Shared, read-only handle to the client.
pub type ClientHandle = Arc<Client>;

/// Holds at most one client for its whole lifetime.
#[derive(Debug, Default)]
pub struct ClientCell {
    handle: OnceLock<ClientHandle>,
    init_lock: Mutex<()>,
}

impl ClientCell {
    pub const fn new() -> Self {
        Self {
            handle: OnceLock::new(),
            init_lock: Mutex::new(()),
        }
    }

    /// The stored handle, if initialization has succeeded.
    pub fn get(&self) -> Option<ClientHandle> {
        self.handle.get().cloned()
    }

    pub fn is_initialized(&self) -> bool {
        self.handle.get().is_some()
    }

    /// Return the stored handle, building it with `init` on first use.
    ///
    /// `init` runs at most once across all threads as long as it succeeds.
    /// On error the cell stays empty and the error is returned.
    pub fn get_or_try_init<F>(&self, init: F) -> Result<ClientHandle, ClientError>
    where
        F: FnOnce() -> Result<Client, ClientError>,
    {
        if let Some(handle) = self.handle.get() {
            return Ok(Arc::clone(handle));
        }

        let _guard = self.init_lock.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = self.handle.get() {
            return Ok(Arc::clone(handle));
        }

        let handle = Arc::new(init()?);
        let _ = self.handle.set(Arc::clone(&handle));
        Ok(handle)
    }

    /// Build and store a client; fails if one is already stored.
    ///
    /// `init` is not called when the cell is already filled.
    pub fn try_init<F>(&self, init: F) -> Result<ClientHandle, ClientError>
    where
        F: FnOnce() -> Result<Client, ClientError>,
    {
        let _guard = self.init_lock.lock().unwrap_or_else(|e| e.into_inner());
        if self.handle.get().is_some() {
            return Err(ClientError::AlreadyInitialized);
        }

        let handle = Arc::new(init()?);
        let _ = self.handle.set(Arc::clone(&handle));
        Ok(handle)
    }
}

static GLOBAL: ClientCell = ClientCell::new();

/// Initialize the process-wide client from a resolved configuration.
pub fn init(config: signaledge_config::ClientConfiguration) -> Result<ClientHandle, ClientError> {
    let handle = GLOBAL.try_init(|| Client::new(config))?;
    info!(id = %handle.id(), "process client initialized");
    Ok(handle)
}

/// Initialize the process-wide client from settings and environment.
///
/// Fails with a missing-credential error when `GEMINI_API_KEY` is unset
/// or empty, leaving the process without a client.
pub fn init_from_env(
    settings_path: Option<&Path>,
    env: &impl EnvSource,
) -> Result<ClientHandle, ClientError> {
    let handle = GLOBAL.try_init(|| {
        let config = signaledge_config::load_config(settings_path, env)?;
        Client::new(config)
    })?;
    info!(id = %handle.id(), "process client initialized");
    Ok(handle)
}

/// The process-wide client.
pub fn get_client() -> Result<ClientHandle, ClientError> {
    GLOBAL.get().ok_or(ClientError::NotInitialized)
}
