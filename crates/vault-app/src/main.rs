mod cli;
mod console;

use std::process::ExitCode;
use std::time::Duration;

use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;
use vault_common::{ConfigError, VaultError};
use vault_config::schema::{BackendConfig, LogLevel};
use vault_config::VaultConfig;
use vault_core::{HttpBackend, HttpBackendConfig, OperationOutcome, RejectReason, Session};

use console::input::LineInput;

/// Parse `KEY=VALUE` lines from a .env file.
fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            (key.trim().to_string(), value.to_string())
        })
        .collect()
}

/// Load `.env` from the current directory. Variables already set win.
fn load_dotenv() {
    let Ok(contents) = std::fs::read_to_string(".env") else {
        return;
    };
    for (key, value) in parse_dotenv(&contents) {
        if std::env::var(&key).is_err() {
            std::env::set_var(key, value);
        }
    }
}

/// `--log-level`, then `RUST_LOG`, then the config file's level.
fn log_directive(cli: Option<&str>, env: Option<String>, config: LogLevel) -> String {
    cli.map(str::to_string)
        .or(env.filter(|v| !v.trim().is_empty()))
        .unwrap_or_else(|| format!("vault={}", config.as_directive()))
}

fn init_logging(cli: Option<&str>, config: LogLevel) {
    let fallback = format!("vault={}", config.as_directive());
    let directive = log_directive(cli, std::env::var("RUST_LOG").ok(), config);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_backend(config: &BackendConfig) -> Result<HttpBackend, VaultError> {
    let http = HttpBackendConfig::new(config.base_url.as_str())
        .with_timeout(Duration::from_secs(config.timeout_secs.into()))
        .with_connect_timeout(Duration::from_secs(config.connect_timeout_secs.into()));
    HttpBackend::new(http).map_err(|e| VaultError::Backend(e.to_string()))
}

/// One query, printed as text or JSON.
async fn ask_once(session: &Session, backend: &HttpBackend, question: &str, json: bool) -> ExitCode {
    session.set_draft(question);
    let outcome = session.submit_query(backend).await;
    if let OperationOutcome::Rejected(RejectReason::EmptyInput) = outcome {
        eprintln!("Nothing to ask.");
        return ExitCode::from(2);
    }

    if let Some(turn) = session.last_turn() {
        if json {
            match serde_json::to_string_pretty(&turn) {
                Ok(text) => println!("{text}"),
                Err(e) => tracing::error!("failed to serialize answer: {e}"),
            }
        } else {
            println!("{}", console::render_turn(&turn));
        }
    }

    match outcome {
        OperationOutcome::Failed(_) => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    }
}

async fn run(args: cli::Args, config: VaultConfig) -> Result<ExitCode, VaultError> {
    let backend = build_backend(&config.backend)?;
    let session = Session::new(config.session.welcome_message);
    tracing::info!(
        session = %session.id().short(),
        base_url = backend.base_url(),
        "session started"
    );

    if let Some(question) = args.ask {
        return Ok(ask_once(&session, &backend, &question, args.json).await);
    }

    for turn in session.transcript() {
        println!("{}", console::render_turn(&turn));
    }
    let renderer = console::spawn_renderer(session.subscribe());
    let input = LineInput::new(BufReader::new(tokio::io::stdin()));
    console::run(&session, &backend, input).await;

    // Dropping the session closes the event channel; the renderer drains
    // what is left and exits.
    drop(session);
    if let Err(e) = renderer.await {
        tracing::warn!("renderer task failed: {e}");
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    // Before the runtime starts any threads.
    load_dotenv();

    let args = cli::parse();

    let loaded = vault_config::load_config(args.config.as_deref());
    let (mut config, load_error) = match loaded {
        Ok(config) => (config, None),
        Err(e) => (VaultConfig::default(), Some(e)),
    };
    vault_config::apply_env_overrides(&mut config);
    if let Some(url) = &args.api_url {
        config.backend.base_url = url.trim().to_string();
    }
    if let Some(secs) = args.timeout {
        config.backend.timeout_secs = secs;
    }

    init_logging(args.log_level.as_deref(), config.logging.level);
    tracing::debug!("vault v{} starting", env!("CARGO_PKG_VERSION"));

    match start(args, config, load_error) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Check the effective config, then run the session on a fresh runtime.
fn start(
    args: cli::Args,
    config: VaultConfig,
    load_error: Option<ConfigError>,
) -> Result<ExitCode, VaultError> {
    if let Some(e) = load_error {
        if args.config.is_some() {
            return Err(e.into());
        }
        tracing::warn!("Config load failed, using defaults: {e}");
    }
    vault_config::validation::validate(&config)?;

    if args.print_config {
        println!("{}", vault_config::config_to_json(&config));
        return Ok(ExitCode::SUCCESS);
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(run(args, config));
    // A stdin read may still be parked on a blocking thread.
    runtime.shutdown_timeout(Duration::from_millis(200));
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotenv_skips_comments_and_strips_quotes() {
        let vars = parse_dotenv(
            "# comment\n\nVAULT_API_URL = \"http://vault:10002\"\nRUST_LOG='debug'\nnot a pair\n",
        );
        assert_eq!(
            vars,
            vec![
                ("VAULT_API_URL".to_string(), "http://vault:10002".to_string()),
                ("RUST_LOG".to_string(), "debug".to_string()),
            ]
        );
    }

    #[test]
    fn cli_log_level_wins() {
        let directive = log_directive(Some("vault_core=trace"), Some("warn".into()), LogLevel::Error);
        assert_eq!(directive, "vault_core=trace");
    }

    #[test]
    fn rust_log_beats_config() {
        assert_eq!(log_directive(None, Some("debug".into()), LogLevel::Info), "debug");
        assert_eq!(log_directive(None, Some("  ".into()), LogLevel::Info), "vault=info");
    }

    #[test]
    fn config_level_maps_to_vault_target() {
        assert_eq!(log_directive(None, None, LogLevel::Warning), "vault=warn");
    }

    #[test]
    fn backend_takes_timeouts_from_config() {
        let config = BackendConfig {
            base_url: "http://localhost:10002/".into(),
            timeout_secs: 30,
            connect_timeout_secs: 5,
        };
        let backend = build_backend(&config).unwrap();
        assert_eq!(backend.base_url(), "http://localhost:10002");
    }

    fn args(argv: &[&str]) -> cli::Args {
        <cli::Args as clap::Parser>::try_parse_from(argv).unwrap()
    }

    #[test]
    fn missing_explicit_config_is_fatal() {
        let path = std::path::PathBuf::from("/nonexistent/vault.toml");
        let err = start(
            args(&["vault", "--config", "/nonexistent/vault.toml", "--print-config"]),
            VaultConfig::default(),
            Some(ConfigError::FileNotFound(path)),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            VaultError::Config(ConfigError::FileNotFound(_))
        ));
    }

    #[test]
    fn default_path_load_failure_falls_back_to_defaults() {
        let code = start(
            args(&["vault", "--print-config"]),
            VaultConfig::default(),
            Some(ConfigError::ParseError("bad toml".into())),
        )
        .unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
    }

    #[test]
    fn invalid_effective_config_refuses_to_start() {
        let mut config = VaultConfig::default();
        config.backend.base_url = "localhost:10002".into();
        let err = start(args(&["vault", "--print-config"]), config, None).unwrap_err();
        assert!(matches!(
            err,
            VaultError::Config(ConfigError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn ask_once_against_unreachable_backend_fails() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let backend = build_backend(&BackendConfig {
            base_url: format!("http://{addr}"),
            timeout_secs: 5,
            connect_timeout_secs: 1,
        })
        .unwrap();
        let session = Session::default();

        let code = ask_once(&session, &backend, "What is X?", false).await;

        assert_eq!(code, ExitCode::FAILURE);
        assert_eq!(
            session.last_turn().unwrap().content(),
            "Error connecting to The Vault."
        );
    }

    #[tokio::test]
    async fn ask_once_rejects_blank_question() {
        let backend = build_backend(&BackendConfig::default()).unwrap();
        let session = Session::default();
        let code = ask_once(&session, &backend, "   ", true).await;
        assert_eq!(code, ExitCode::from(2));
        assert_eq!(session.turn_count(), 1);
    }
}
