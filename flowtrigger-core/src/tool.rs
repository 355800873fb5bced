//! Function-calling descriptor for LLM agents
//!
//! Describes the trigger function the way tool-calling models expect it:
//! a name, a description and a JSON Schema for the arguments. Arguments
//! produced against this schema deserialize directly into
//! [`TriggerArgs`](crate::domain::job::TriggerArgs).

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Tool name exposed to agents
pub const TOOL_NAME: &str = "trigger_databricks_flow";

const TOOL_DESCRIPTION: &str = "Trigger a Databricks Job/Flow and return the run details. \
     Returns JSON with success, run_id, state and run_page_url on success, \
     or error and error_type on failure.";

/// Tool descriptor handed to an agent runtime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// Build the descriptor for the trigger function
pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: TOOL_NAME.to_string(),
        description: TOOL_DESCRIPTION.to_string(),
        parameters: parameters_schema(),
    }
}

fn parameters_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "job_id": {
                "type": "string",
                "description": "The unique identifier of the Databricks Job to trigger. Example: \"123456789\""
            },
            "notebook_params": {
                "type": "string",
                "description": "JSON object of key-value pairs for notebook parameters. Example: {\"param1\": \"value1\"}"
            },
            "python_params": {
                "type": "string",
                "description": "JSON array of command-line parameters for Python tasks. Example: [\"--input\", \"data.csv\"]"
            },
            "jar_params": {
                "type": "string",
                "description": "JSON array of command-line parameters for JAR tasks. Example: [\"arg1\", \"arg2\"]"
            },
            "pipeline_params": {
                "type": "string",
                "description": "JSON object for Delta Live Tables pipeline parameters. Example: {\"full_refresh\": \"true\"}"
            },
            "sql_params": {
                "type": "string",
                "description": "JSON object for SQL query parameters. Example: {\"date\": \"2024-01-01\"}"
            },
            "dbt_commands": {
                "type": "string",
                "description": "JSON array of dbt commands to run. Example: [\"dbt run\", \"dbt test\"]"
            },
            "idempotency_token": {
                "type": "string",
                "description": "Token to guarantee idempotency. Requests with the same token do not create duplicate runs."
            }
        },
        "required": ["job_id"],
        "additionalProperties": false
    })
}
