//! gigatools — interactive GigaChat assistant with calculator, clock and
//! incident-list tools.
//!
//! Usage:
//!   gigatools <AUTH_KEY>                  Start the dialog
//!   gigatools --config ./gigatools.toml   Read settings (and the key) from a file
//!
//! Type a question per line; `exit` ends the session.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::sync::Arc;
use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;
use tracing::info;

use gigatools::agent::{self, system_prompt, AssistantSession, ChatModel, SessionSettings};
use gigatools::config::{self, GigaToolsConfig};
use gigatools::gigachat::GigaChatClient;
use gigatools::tools::ToolRegistry;
use gigatools::Error;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "gigatools")]
#[command(version = "0.1.0")]
#[command(about = "Chat with GigaChat; the model can call calculator, clock and incident tools")]
struct Cli {
    /// GigaChat authorization key (falls back to `auth_key` in the config file).
    auth_key: Option<String>,

    /// Path to the TOML config file [default: ~/.gigatools/gigatools.toml].
    #[arg(long)]
    config: Option<String>,

    /// Chat model name, overriding the config file.
    #[arg(long)]
    model: Option<String>,

    /// Total attempts per request, overriding the config file.
    #[arg(long)]
    max_retries: Option<u32>,

    /// Log level (debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn apply_overrides(&self, cfg: &mut GigaToolsConfig) {
        if let Some(model) = &self.model {
            cfg.model = model.clone();
        }
        if let Some(max_retries) = self.max_retries {
            cfg.max_retries = max_retries;
        }
        if let Some(level) = &self.log_level {
            cfg.log_level = level.clone();
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .as_deref()
        .map(config::expand_path)
        .unwrap_or_else(config::default_config_path);
    let mut cfg = config::load_config(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    cli.apply_overrides(&mut cfg);

    // Logs go to stderr; stdout carries only assistant replies.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let Some(auth_key) = cfg.resolve_auth_key(cli.auth_key.as_deref()) else {
        eprintln!("{} {}", "Error:".red().bold(), Error::MissingCredential);
        std::process::exit(1);
    };

    system_prompt::log_example_prompts();

    let client = GigaChatClient::new(&cfg, &auth_key).context("Failed to build GigaChat client")?;
    info!(
        "Connected assistant to {} (max retries: {})",
        client.model_name(),
        cfg.max_retries
    );
    let session = AssistantSession::new(
        Arc::new(client),
        ToolRegistry::builtin(),
        SessionSettings::from(&cfg),
    );

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    agent::run_dialog(&session, stdin, &mut stdout, cancel).await?;

    Ok(())
}
