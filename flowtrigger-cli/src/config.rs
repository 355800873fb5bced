//! Configuration module
//!
//! Handles CLI configuration: workspace connection settings given as flags
//! or environment variables, layered over the Databricks config file.

use flowtrigger_client::{Overrides, Result, WorkspaceConfig};

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Workspace URL
    pub host: Option<String>,
    /// Access token
    pub token: Option<String>,
    /// Config file profile name
    pub profile: Option<String>,
}

impl Config {
    /// Resolve the workspace settings, falling back to the config file
    pub fn workspace(&self) -> Result<WorkspaceConfig> {
        WorkspaceConfig::resolve(Overrides {
            host: self.host.clone(),
            token: self.token.clone(),
            profile: self.profile.clone(),
        })
    }
}
