pub mod errors;
pub mod events;
pub mod id;
pub mod types;

pub use errors::{ConfigError, VaultError};
pub use events::{EventBus, SessionEvent};
pub use id::{new_correlation_id, new_id, SessionId};
pub use types::{Role, Turn};

pub type Result<T> = std::result::Result<T, VaultError>;
