use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("backend error: {0}")]
    Backend(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("backend.timeout_secs = 0".into());
        assert_eq!(
            err.to_string(),
            "config validation error: backend.timeout_secs = 0"
        );
    }

    #[test]
    fn vault_error_from_config() {
        let config_err = ConfigError::ParseError("bad toml".into());
        let err: VaultError = config_err.into();
        assert!(matches!(err, VaultError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn vault_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdout closed");
        let err: VaultError = io_err.into();
        assert!(matches!(err, VaultError::Io(_)));
        assert!(err.to_string().contains("stdout closed"));
    }

    #[test]
    fn vault_error_backend_display() {
        let err = VaultError::Backend("HTTP 500".into());
        assert_eq!(err.to_string(), "backend error: HTTP 500");
    }
}
