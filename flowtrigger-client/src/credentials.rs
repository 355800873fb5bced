//! Workspace credential discovery
//!
//! Resolves the workspace host and access token the way the Databricks
//! tooling does, in order:
//! 1. Explicit values (e.g. CLI flags)
//! 2. `DATABRICKS_HOST` / `DATABRICKS_TOKEN`
//! 3. A profile in the Databricks config file (`DATABRICKS_CONFIG_FILE` or
//!    `~/.databrickscfg`), selected by `DATABRICKS_CONFIG_PROFILE` or
//!    `DEFAULT`
//!
//! Each field is taken from the first source that provides it.

use std::path::{Path, PathBuf};

use config::{Config, File, FileFormat};
use tracing::debug;

use crate::error::{ClientError, Result};

pub const HOST_ENV: &str = "DATABRICKS_HOST";
pub const TOKEN_ENV: &str = "DATABRICKS_TOKEN";
pub const PROFILE_ENV: &str = "DATABRICKS_CONFIG_PROFILE";
pub const CONFIG_FILE_ENV: &str = "DATABRICKS_CONFIG_FILE";
pub const DEFAULT_PROFILE: &str = "DEFAULT";

/// Resolved workspace connection settings
#[derive(Clone)]
pub struct WorkspaceConfig {
    /// Workspace URL (e.g., "https://adb-123.4.azuredatabricks.net")
    pub host: String,
    /// Personal access token sent as a bearer token
    pub token: String,
}

impl std::fmt::Debug for WorkspaceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkspaceConfig")
            .field("host", &self.host)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Values that take precedence over every other source
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub token: Option<String>,
    pub profile: Option<String>,
}

impl WorkspaceConfig {
    /// Creates a configuration from explicit values
    pub fn new(host: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            host: normalize_host(&host.into()),
            token: token.into(),
        }
    }

    /// Resolves configuration from the process environment and config file
    pub fn from_env() -> Result<Self> {
        Self::resolve(Overrides::default())
    }

    /// Resolves configuration with explicit overrides on top of the default chain
    pub fn resolve(overrides: Overrides) -> Result<Self> {
        Self::resolve_with(overrides, |key| std::env::var(key).ok())
    }

    /// Resolves configuration using `env` to look up environment variables
    pub fn resolve_with<F>(overrides: Overrides, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        let mut host = overrides.host.or_else(|| env(HOST_ENV));
        let mut token = overrides.token.or_else(|| env(TOKEN_ENV));

        if host.is_none() || token.is_none() {
            let profile = overrides
                .profile
                .or_else(|| env(PROFILE_ENV))
                .unwrap_or_else(|| DEFAULT_PROFILE.to_string());

            if let Some(path) = env(CONFIG_FILE_ENV)
                .map(PathBuf::from)
                .or_else(|| env("HOME").map(|home| Path::new(&home).join(".databrickscfg")))
            {
                let (file_host, file_token) = read_profile(&path, &profile)?;
                host = host.or(file_host);
                token = token.or(file_token);
            }
        }

        let host = host.ok_or_else(|| {
            ClientError::Config(format!(
                "no workspace host configured; set {} or add 'host' to a config profile",
                HOST_ENV
            ))
        })?;
        let token = token.ok_or_else(|| {
            ClientError::Config(format!(
                "no access token configured; set {} or add 'token' to a config profile",
                TOKEN_ENV
            ))
        })?;

        let config = Self::new(host, token);
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.token.trim().is_empty() {
            return Err(ClientError::Config("token cannot be empty".to_string()));
        }

        if !self.host.starts_with("http://") && !self.host.starts_with("https://") {
            return Err(ClientError::Config(
                "host must start with http:// or https://".to_string(),
            ));
        }

        Ok(())
    }
}

/// Reads `host` and `token` from one profile of an INI config file
///
/// A missing file yields no values; a missing profile in an existing file is
/// not an error either, since earlier sources may already be complete.
fn read_profile(path: &Path, profile: &str) -> Result<(Option<String>, Option<String>)> {
    if !path.exists() {
        debug!("Config file {} not found, skipping", path.display());
        return Ok((None, None));
    }

    let file = Config::builder()
        .add_source(File::from(path).format(FileFormat::Ini))
        .build()
        .map_err(|e| ClientError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    // Section names may come back lowercased depending on the parser.
    let get = |key: &str| {
        [profile.to_string(), profile.to_lowercase()]
            .iter()
            .find_map(|section| file.get_string(&format!("{}.{}", section, key)).ok())
            .filter(|v| !v.trim().is_empty())
    };

    debug!("Loaded profile {} from {}", profile, path.display());
    Ok((get("host"), get("token")))
}

/// Adds `https://` to scheme-less hosts and drops trailing slashes
fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.contains("://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    fn profile_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".ini")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_env_only() {
        let config = WorkspaceConfig::resolve_with(
            Overrides::default(),
            env_from(&[(HOST_ENV, "https://example.cloud.databricks.com/"), (TOKEN_ENV, "dapi123")]),
        )
        .unwrap();
        assert_eq!(config.host, "https://example.cloud.databricks.com");
        assert_eq!(config.token, "dapi123");
    }

    #[test]
    fn test_overrides_win() {
        let config = WorkspaceConfig::resolve_with(
            Overrides {
                host: Some("override.example.com".to_string()),
                token: None,
                profile: None,
            },
            env_from(&[(HOST_ENV, "https://env.example.com"), (TOKEN_ENV, "dapi123")]),
        )
        .unwrap();
        assert_eq!(config.host, "https://override.example.com");
    }

    #[test]
    fn test_profile_fills_missing_fields() {
        let file = profile_file(
            "[DEFAULT]\nhost = https://default.example.com\ntoken = dapi-default\n\n\
             [staging]\nhost = https://staging.example.com\ntoken = dapi-staging\n",
        );
        let path = file.path().to_str().unwrap();

        let config = WorkspaceConfig::resolve_with(
            Overrides::default(),
            env_from(&[(CONFIG_FILE_ENV, path), (PROFILE_ENV, "staging")]),
        )
        .unwrap();
        assert_eq!(config.host, "https://staging.example.com");
        assert_eq!(config.token, "dapi-staging");

        let config = WorkspaceConfig::resolve_with(
            Overrides::default(),
            env_from(&[(CONFIG_FILE_ENV, path), (TOKEN_ENV, "dapi-env")]),
        )
        .unwrap();
        assert_eq!(config.host, "https://default.example.com");
        assert_eq!(config.token, "dapi-env");
    }

    #[test]
    fn test_missing_everything_is_config_error() {
        let err = WorkspaceConfig::resolve_with(
            Overrides::default(),
            env_from(&[(CONFIG_FILE_ENV, "/nonexistent/databrickscfg")]),
        )
        .unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn test_validation() {
        let mut config = WorkspaceConfig::new("example.com", "dapi");
        assert!(config.validate().is_ok());

        config.token = String::new();
        assert!(config.validate().is_err());

        config.token = "dapi".to_string();
        config.host = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = WorkspaceConfig::new("https://example.com", "secret-token");
        assert!(!format!("{:?}", config).contains("secret-token"));
    }
}
