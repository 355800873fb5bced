//! Trigger command handler
//!
//! Triggers a single job run exactly as the agent-facing function does and
//! prints the result, either as a readable summary or as raw JSON.

use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use flowtrigger_client::{WorkspaceClient, submit};
use flowtrigger_core::domain::job::{TriggerArgs, TriggerRequest};
use flowtrigger_core::domain::result::{FaultKind, TriggerResult};
use flowtrigger_core::dto::run::RunNowRequest;
use uuid::Uuid;

use crate::config::Config;

/// Arguments of the trigger command
#[derive(Args)]
pub struct TriggerCommand {
    /// The Databricks job ID to trigger
    #[arg(long)]
    job_id: String,

    /// Notebook parameters as JSON object, e.g. '{"param1": "value1"}'
    #[arg(long, visible_alias = "params")]
    notebook_params: Option<String>,

    /// Python parameters as JSON array, e.g. '["--arg1", "value1"]'
    #[arg(long)]
    python_params: Option<String>,

    /// JAR parameters as JSON array, e.g. '["arg1", "arg2"]'
    #[arg(long)]
    jar_params: Option<String>,

    /// Pipeline parameters as JSON object, e.g. '{"full_refresh": "true"}'
    #[arg(long)]
    pipeline_params: Option<String>,

    /// SQL parameters as JSON object, e.g. '{"date": "2024-01-01"}'
    #[arg(long)]
    sql_params: Option<String>,

    /// dbt commands as JSON array, e.g. '["dbt run", "dbt test"]'
    #[arg(long)]
    dbt_commands: Option<String>,

    /// Idempotency token to prevent duplicate runs
    #[arg(long, conflicts_with = "auto_token")]
    idempotency_token: Option<String>,

    /// Generate a random idempotency token
    #[arg(long)]
    auto_token: bool,

    /// Validate and show the request without triggering the job
    #[arg(long)]
    dry_run: bool,

    /// Print only the JSON result
    #[arg(long)]
    json: bool,
}

impl TriggerCommand {
    fn to_args(&self) -> TriggerArgs {
        let idempotency_token = if self.auto_token {
            Some(Uuid::new_v4().to_string())
        } else {
            self.idempotency_token.clone()
        };

        TriggerArgs {
            job_id: self.job_id.clone(),
            notebook_params: self.notebook_params.clone(),
            python_params: self.python_params.clone(),
            jar_params: self.jar_params.clone(),
            pipeline_params: self.pipeline_params.clone(),
            sql_params: self.sql_params.clone(),
            dbt_commands: self.dbt_commands.clone(),
            idempotency_token,
        }
    }
}

/// Handle the trigger command
///
/// Input is validated before credentials are resolved, so a dry run works
/// without any workspace configuration.
///
/// # Arguments
/// * `command` - The parsed trigger arguments
/// * `config` - The CLI configuration
pub async fn handle_trigger_command(command: TriggerCommand, config: &Config) -> Result<()> {
    let args = command.to_args();

    if !command.json {
        print_header(&args);
    }

    let request = match TriggerRequest::try_from(&args) {
        Ok(request) => request,
        Err(e) => {
            let result = TriggerResult::failed(&args.job_id, FaultKind::ParameterError, e.to_string());
            return report(&result, command.json);
        }
    };

    if command.dry_run {
        return print_dry_run(&RunNowRequest::from(request), command.json);
    }

    let client = match config.workspace() {
        Ok(workspace) => WorkspaceClient::new(workspace),
        Err(e) => {
            let result = TriggerResult::failed(&args.job_id, e.fault_kind(), e.to_string());
            return report(&result, command.json);
        }
    };

    if !command.json {
        println!("{}", format!("Triggering job on {}...", client.base_url()).dimmed());
        println!();
    }

    let result = submit(&client, &args.job_id, request).await;
    report(&result, command.json)
}

/// Print the result and turn a failed trigger into a non-zero exit
fn report(result: &TriggerResult, json_only: bool) -> Result<()> {
    if json_only {
        println!("{}", result.to_json());
    } else {
        print_result(result);
    }

    if !result.is_success() {
        anyhow::bail!("Failed to trigger job {}", result.job_id());
    }
    Ok(())
}

fn print_dry_run(body: &RunNowRequest, json_only: bool) -> Result<()> {
    let pretty = serde_json::to_string_pretty(body).context("Failed to serialize request")?;

    if json_only {
        println!("{}", pretty);
        return Ok(());
    }

    println!("{}", "[DRY RUN] Would send run-now request:".yellow().bold());
    println!("{}", pretty);
    println!();
    println!("{}", "Remove --dry-run to actually trigger the job".dimmed());
    Ok(())
}

fn print_header(args: &TriggerArgs) {
    println!("{}", "─".repeat(80).dimmed());
    println!("{}", "Databricks Job Trigger".bold());
    println!("{}", "─".repeat(80).dimmed());
    println!("  Job ID:            {}", args.job_id.cyan());

    let optional = [
        ("Notebook params:", &args.notebook_params),
        ("Python params:", &args.python_params),
        ("JAR params:", &args.jar_params),
        ("Pipeline params:", &args.pipeline_params),
        ("SQL params:", &args.sql_params),
        ("dbt commands:", &args.dbt_commands),
        ("Idempotency token:", &args.idempotency_token),
    ];
    for (label, value) in optional {
        if let Some(value) = value {
            println!("  {:<18} {}", label, value);
        }
    }

    println!("{}", "─".repeat(80).dimmed());
    println!();
}

fn print_result(result: &TriggerResult) {
    match result {
        TriggerResult::Triggered(run) => {
            println!("{} {}", "✓".green(), "Job triggered successfully!".bold());
            println!("  Run ID:      {}", run.run_id.to_string().cyan());
            if let Some(number) = run.number_in_job {
                println!("  Run Number:  {}", number);
            }
            if let Some(state) = &run.state.life_cycle_state {
                println!("  Status:      {}", state);
            }
            if let Some(message) = run.state.state_message.as_deref().filter(|m| !m.is_empty()) {
                println!("  Message:     {}", message.dimmed());
            }
            if let Some(url) = &run.run_page_url {
                println!("  View Run:    {}", url.underline());
            }
        }
        TriggerResult::Failed(failure) => {
            println!("{} {}", "✗".red(), "Failed to trigger job".bold());
            println!("  Error:       {}", failure.error_type.to_string().red());
            println!("  Message:     {}", failure.message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        trigger: TriggerCommand,
    }

    fn parse(argv: &[&str]) -> Result<TriggerCommand, clap::Error> {
        let mut full = vec!["flowtrigger"];
        full.extend_from_slice(argv);
        TestCli::try_parse_from(full).map(|cli| cli.trigger)
    }

    #[test]
    fn test_params_alias_maps_to_notebook_params() {
        let command = parse(&["--job-id", "123", "--params", r#"{"env": "test"}"#]).unwrap();
        let args = command.to_args();
        assert_eq!(args.job_id, "123");
        assert_eq!(args.notebook_params.as_deref(), Some(r#"{"env": "test"}"#));
        assert!(args.idempotency_token.is_none());
    }

    #[test]
    fn test_auto_token_generates_uuid() {
        let command = parse(&["--job-id", "1", "--auto-token"]).unwrap();
        let token = command.to_args().idempotency_token.unwrap();
        assert!(Uuid::parse_str(&token).is_ok());
    }

    #[test]
    fn test_explicit_token_conflicts_with_auto_token() {
        assert!(parse(&["--job-id", "1", "--auto-token", "--idempotency-token", "t"]).is_err());
    }

    #[test]
    fn test_job_id_required() {
        assert!(parse(&["--dry-run"]).is_err());
    }
}
