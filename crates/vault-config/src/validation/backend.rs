//! Validation for the backend and session sections.

use crate::schema::VaultConfig;

use super::helpers::validate_range;

pub(crate) fn validate_backend(errors: &mut Vec<String>, config: &VaultConfig) {
    let url = config.backend.base_url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        errors.push(format!(
            "backend.base_url = {url:?} must start with http:// or https://"
        ));
    }
    validate_range(
        errors,
        "backend.timeout_secs",
        config.backend.timeout_secs,
        1,
        600,
    );
    validate_range(
        errors,
        "backend.connect_timeout_secs",
        config.backend.connect_timeout_secs,
        1,
        60,
    );
}

pub(crate) fn validate_session(errors: &mut Vec<String>, config: &VaultConfig) {
    if config.session.welcome_message.trim().is_empty() {
        errors.push("session.welcome_message must not be empty".into());
    }
}
