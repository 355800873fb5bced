//! Tool definition command

use anyhow::{Context, Result};
use flowtrigger_core::tool;

/// Print the tool definition agents register for the trigger function
pub fn print_tool_spec() -> Result<()> {
    let spec = serde_json::to_string_pretty(&tool::definition())
        .context("Failed to serialize tool definition")?;
    println!("{}", spec);
    Ok(())
}
