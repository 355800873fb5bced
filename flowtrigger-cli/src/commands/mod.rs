//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod tool;
mod trigger;

pub use trigger::TriggerCommand;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Trigger a job run
    Trigger(TriggerCommand),
    /// Print the function-calling tool definition as JSON
    ToolSpec,
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Trigger(command) => trigger::handle_trigger_command(command, config).await,
        Commands::ToolSpec => tool::print_tool_spec(),
    }
}
