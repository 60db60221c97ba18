//! Validation for the `[events]` section.

use crate::schema::Settings;

use super::helpers::validate_http_url;

pub(crate) fn validate_events(errors: &mut Vec<String>, settings: &Settings) {
    if let Some(ref url) = settings.events.base_url {
        validate_http_url(errors, "events.base_url", url);
    }
}
