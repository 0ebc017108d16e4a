//! Backend connection settings.

use serde::{Deserialize, Serialize};

/// Default address of a locally running Vault server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:10002";

/// Where the Vault lives and how long to wait for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    /// Whole-request timeout in seconds (valid range: 1-600).
    pub timeout_secs: u32,
    /// TCP connect timeout in seconds (valid range: 1-60).
    pub connect_timeout_secs: u32,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            timeout_secs: 120,
            connect_timeout_secs: 10,
        }
    }
}
