//! Validation for the `[gemini]` section.

use crate::schema::Settings;

use super::helpers::{validate_http_url, validate_range, validate_range_f64};

pub(crate) fn validate_gemini(errors: &mut Vec<String>, settings: &Settings) {
    let gemini = &settings.gemini;

    if gemini.model.trim().is_empty() {
        errors.push("gemini.model must not be empty".to_string());
    }
    validate_range(errors, "gemini.max_tokens", gemini.max_tokens, 1, 65_536);
    validate_range_f64(errors, "gemini.temperature", gemini.temperature, 0.0, 2.0);

    if let Some(ref url) = gemini.base_url {
        validate_http_url(errors, "gemini.base_url", url);
    }
}
