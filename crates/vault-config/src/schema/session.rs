//! Conversation session settings.

use serde::{Deserialize, Serialize};

pub use vault_common::types::DEFAULT_WELCOME_MESSAGE;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Seed assistant turn shown when a session starts.
    pub welcome_message: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            welcome_message: DEFAULT_WELCOME_MESSAGE.into(),
        }
    }
}
