//! Command-line entry point for the vertaal translation backend.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use vertaal::config::ServiceConfig;

#[derive(Parser)]
#[command(name = "vertaal", version, about = "Markup-aware translation backend")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP API server
    Serve {
        /// IP address to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(long, default_value_t = 3160)]
        port: u16,

        /// Path to a vertaal.toml config file (default: discover in
        /// current and parent directories)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { host, port, config } => {
            let config = match config {
                Some(path) => ServiceConfig::from_toml_file(&path)
                    .with_context(|| format!("failed to load config from {}", path.display()))?,
                None => ServiceConfig::discover()
                    .context("config discovery failed")?
                    .unwrap_or_else(|| {
                        tracing::info!("No config file found, using default configuration");
                        ServiceConfig::default()
                    }),
            };

            vertaal::api::serve_with_config(&host, port, config.with_env_overrides())
                .await
                .context("server exited with an error")?;
        }
    }

    Ok(())
}
