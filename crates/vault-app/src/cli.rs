use std::path::PathBuf;

use clap::Parser;

/// The Vault: ask questions of your documents, or feed it new ones.
#[derive(Parser, Debug)]
#[command(name = "vault", version, about)]
pub struct Args {
    /// Base URL of the Vault server (overrides VAULT_API_URL and the config file).
    #[arg(long)]
    pub api_url: Option<String>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u32>,

    /// Log filter override (e.g. debug, vault_core=trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Ask a single question, print the answer, and exit.
    #[arg(long)]
    pub ask: Option<String>,

    /// With --ask, print the answer turn as JSON.
    #[arg(long, requires = "ask")]
    pub json: bool,

    /// Print the effective configuration as JSON and exit.
    #[arg(long)]
    pub print_config: bool,
}

pub fn parse() -> Args {
    Args::parse()
}
