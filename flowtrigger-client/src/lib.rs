//! Flow Trigger HTTP Client
//!
//! A small, type-safe client for the Databricks Jobs API, plus the trigger
//! routine an LLM agent calls to start a workflow run.
//!
//! The trigger routine never fails: every outcome, including bad input and
//! remote faults, comes back as a JSON result string.
//!
//! # Example
//!
//! ```no_run
//! use flowtrigger_client::{WorkspaceClient, WorkspaceConfig, trigger_flow_json};
//! use flowtrigger_core::domain::job::TriggerArgs;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = WorkspaceClient::new(WorkspaceConfig::from_env()?);
//!
//!     let args = TriggerArgs::new("123456789")
//!         .notebook_params(r#"{"start_date": "2024-01-01"}"#);
//!
//!     println!("{}", trigger_flow_json(&client, &args).await);
//!     Ok(())
//! }
//! ```

pub mod credentials;
pub mod error;
mod jobs;
mod trigger;

// Re-export commonly used types
pub use credentials::{Overrides, WorkspaceConfig};
pub use error::{ClientError, Result};
pub use jobs::JobsApi;
pub use trigger::{submit, trigger_flow, trigger_flow_json, trigger_with_default_credentials};

use flowtrigger_core::dto::run::ApiErrorBody;
use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for a Databricks workspace
///
/// Authenticates every request with the configured bearer token.
#[derive(Debug, Clone)]
pub struct WorkspaceClient {
    /// Base URL of the workspace (e.g., "https://adb-123.4.azuredatabricks.net")
    base_url: String,
    /// Access token
    token: String,
    /// HTTP client instance
    client: Client,
}

impl WorkspaceClient {
    /// Create a new workspace client
    ///
    /// # Example
    /// ```
    /// use flowtrigger_client::{WorkspaceClient, WorkspaceConfig};
    ///
    /// let client = WorkspaceClient::new(WorkspaceConfig::new("https://example.cloud.databricks.com", "dapi123"));
    /// ```
    pub fn new(config: WorkspaceConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Create a new workspace client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use flowtrigger_client::{WorkspaceClient, WorkspaceConfig};
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let config = WorkspaceConfig::new("https://example.cloud.databricks.com", "dapi123");
    /// let client = WorkspaceClient::with_client(config, http_client);
    /// ```
    pub fn with_client(config: WorkspaceConfig, client: Client) -> Self {
        Self {
            base_url: config.host.trim_end_matches('/').to_string(),
            token: config.token,
            client,
        }
    }

    /// Get the base URL of the workspace
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// Error bodies are decoded as `{error_code, message}` when possible so
    /// the caller can classify the fault.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(api_error_from_body(status.as_u16(), &error_text));
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

fn api_error_from_body(status: u16, body: &str) -> ClientError {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(ApiErrorBody {
            error_code,
            message: Some(message),
        }) => ClientError::api_error(status, error_code, message),
        Ok(ApiErrorBody { error_code, .. }) => {
            ClientError::api_error(status, error_code, format!("Request failed with status {}", status))
        }
        Err(_) if body.trim().is_empty() => {
            ClientError::api_error(status, None, format!("Request failed with status {}", status))
        }
        Err(_) => ClientError::api_error(status, None, body.trim()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(host: &str) -> WorkspaceConfig {
        WorkspaceConfig::new(host, "dapi-test")
    }

    #[test]
    fn test_client_creation() {
        let client = WorkspaceClient::new(config("https://example.cloud.databricks.com"));
        assert_eq!(client.base_url(), "https://example.cloud.databricks.com");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = WorkspaceClient::new(config("https://example.cloud.databricks.com/"));
        assert_eq!(client.base_url(), "https://example.cloud.databricks.com");
    }

    #[test]
    fn test_client_with_custom_client() {
        let http_client = Client::new();
        let client = WorkspaceClient::with_client(config("http://localhost:8080"), http_client);
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_error_body_decoding() {
        let err = api_error_from_body(
            404,
            r#"{"error_code": "RESOURCE_DOES_NOT_EXIST", "message": "Job 1 does not exist."}"#,
        );
        match err {
            ClientError::ApiError {
                status,
                error_code,
                message,
            } => {
                assert_eq!(status, 404);
                assert_eq!(error_code.as_deref(), Some("RESOURCE_DOES_NOT_EXIST"));
                assert_eq!(message, "Job 1 does not exist.");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = api_error_from_body(502, "<html>Bad Gateway</html>");
        assert_eq!(err.to_string(), "<html>Bad Gateway</html>");

        let err = api_error_from_body(500, "");
        assert_eq!(err.to_string(), "Request failed with status 500");
    }
}
