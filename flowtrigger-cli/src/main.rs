//! Flow Trigger CLI
//!
//! Command-line interface for triggering Databricks job runs locally, the
//! same way an agent would through the trigger function.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "flowtrigger")]
#[command(about = "Trigger Databricks workflow runs", long_about = None)]
struct Cli {
    /// Workspace URL
    #[arg(long, env = "DATABRICKS_HOST")]
    host: Option<String>,

    /// Personal access token
    #[arg(long, env = "DATABRICKS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Profile in ~/.databrickscfg to read missing settings from
    #[arg(long, env = "DATABRICKS_CONFIG_PROFILE")]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so results on stdout stay machine-readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flowtrigger_client=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config {
        host: cli.host,
        token: cli.token,
        profile: cli.profile,
    };

    handle_command(cli.command, &config).await
}
