//! Vault client configuration.
//!
//! TOML-based configuration with full validation. All sections use
//! sensible defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use vault_config::load_config;
//!
//! let config = load_config(None).expect("failed to load config");
//! println!("{}", config.backend.base_url);
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::VaultConfig;

use std::path::Path;
use vault_common::ConfigError;

/// Environment variable that overrides `backend.base_url`.
pub const API_URL_ENV: &str = "VAULT_API_URL";

/// Load config from `path`, or from the platform default path when `None`.
///
/// An explicit path must exist; the default path is created from the
/// template on first run.
pub fn load_config(path: Option<&Path>) -> Result<VaultConfig, ConfigError> {
    match path {
        Some(p) => toml_loader::load_from_path(p),
        None => toml_loader::load_default(),
    }
}

/// Apply the `VAULT_API_URL` override, if set and non-empty.
pub fn apply_env_overrides(config: &mut VaultConfig) {
    if let Ok(url) = std::env::var(API_URL_ENV) {
        apply_api_url(config, &url);
    }
}

fn apply_api_url(config: &mut VaultConfig, url: &str) {
    let url = url.trim();
    if !url.is_empty() {
        tracing::debug!("backend.base_url overridden to {url}");
        config.backend.base_url = url.to_string();
    }
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &VaultConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
