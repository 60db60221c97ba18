//! Settings validation.
//!
//! Each section has its own submodule; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod events;
mod gemini;
pub(crate) mod helpers;


use crate::schema::Settings;
use signaledge_common::ConfigError;

/// Run all validations on the settings, collecting all errors.
pub fn validate(settings: &Settings) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    gemini::validate_gemini(&mut errors, settings);
    events::validate_events(&mut errors, settings);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
