//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# The Vault client configuration
# Only override what you want to change -- missing fields use defaults.
# VAULT_API_URL and --api-url take precedence over backend.base_url.

[backend]
# base_url = "http://localhost:10002"
# timeout_secs = 120          # 1-600
# connect_timeout_secs = 10   # 1-60

[session]
# welcome_message = "I am The Vault. Upload a document or ask me anything."

[logging]
# level = "INFO"              # DEBUG, INFO, WARNING, ERROR
"##
    .to_string()
}
