//! Configuration schema types for the Vault client.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod backend;
mod session;
mod system;

pub use backend::*;
pub use session::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Root configuration.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct VaultConfig {
    pub backend: BackendConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}
