//! Job trigger domain types

use serde::{Deserialize, Serialize};

use crate::dto::run::RunNowRequest;
use crate::params::{self, ParamError, ParamList, ParamMap};

/// Numeric identifier of a Databricks job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(u64);

impl JobId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u64 {
        self.0
    }

    /// Parse a caller-supplied job identifier
    ///
    /// Surrounding whitespace is ignored. Zero is rejected since the
    /// service never assigns it.
    pub fn parse(input: &str) -> Result<Self, ParamError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ParamError::MissingJobId);
        }

        match trimmed.parse::<u64>() {
            Ok(0) | Err(_) => Err(ParamError::InvalidJobId(trimmed.to_string())),
            Ok(id) => Ok(Self(id)),
        }
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw trigger arguments, exactly as an agent or SQL caller supplies them
///
/// Structured fields are JSON-encoded strings; an empty one counts as absent.
/// The idempotency token is forwarded exactly as given. Deserializable so
/// that tool-call arguments can be passed straight through; unknown keys are
/// rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TriggerArgs {
    #[serde(default)]
    pub job_id: String,
    #[serde(default)]
    pub notebook_params: Option<String>,
    #[serde(default)]
    pub python_params: Option<String>,
    #[serde(default)]
    pub jar_params: Option<String>,
    #[serde(default)]
    pub pipeline_params: Option<String>,
    #[serde(default)]
    pub sql_params: Option<String>,
    #[serde(default)]
    pub dbt_commands: Option<String>,
    #[serde(default)]
    pub idempotency_token: Option<String>,
}

impl TriggerArgs {
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            ..Default::default()
        }
    }

    pub fn notebook_params(mut self, json: impl Into<String>) -> Self {
        self.notebook_params = Some(json.into());
        self
    }

    pub fn python_params(mut self, json: impl Into<String>) -> Self {
        self.python_params = Some(json.into());
        self
    }

    pub fn jar_params(mut self, json: impl Into<String>) -> Self {
        self.jar_params = Some(json.into());
        self
    }

    pub fn pipeline_params(mut self, json: impl Into<String>) -> Self {
        self.pipeline_params = Some(json.into());
        self
    }

    pub fn sql_params(mut self, json: impl Into<String>) -> Self {
        self.sql_params = Some(json.into());
        self
    }

    pub fn dbt_commands(mut self, json: impl Into<String>) -> Self {
        self.dbt_commands = Some(json.into());
        self
    }

    pub fn idempotency_token(mut self, token: impl Into<String>) -> Self {
        self.idempotency_token = Some(token.into());
        self
    }
}

/// Validated, typed trigger request
///
/// Built once per invocation from [`TriggerArgs`] and consumed by the
/// client. Construction fails before any remote call is made.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerRequest {
    pub job_id: JobId,
    pub notebook_params: Option<ParamMap>,
    pub python_params: Option<ParamList>,
    pub jar_params: Option<ParamList>,
    pub pipeline_params: Option<ParamMap>,
    pub sql_params: Option<ParamMap>,
    pub dbt_commands: Option<ParamList>,
    pub idempotency_token: Option<String>,
}

impl TryFrom<&TriggerArgs> for TriggerRequest {
    type Error = ParamError;

    fn try_from(args: &TriggerArgs) -> Result<Self, Self::Error> {
        Ok(Self {
            job_id: JobId::parse(&args.job_id)?,
            notebook_params: params::decode_map("notebook_params", args.notebook_params.as_deref())?,
            python_params: params::decode_list("python_params", args.python_params.as_deref())?,
            jar_params: params::decode_list("jar_params", args.jar_params.as_deref())?,
            pipeline_params: params::decode_map("pipeline_params", args.pipeline_params.as_deref())?,
            sql_params: params::decode_map("sql_params", args.sql_params.as_deref())?,
            dbt_commands: params::decode_list("dbt_commands", args.dbt_commands.as_deref())?,
            idempotency_token: args.idempotency_token.clone(),
        })
    }
}

impl From<TriggerRequest> for RunNowRequest {
    fn from(req: TriggerRequest) -> Self {
        Self {
            job_id: req.job_id,
            notebook_params: req.notebook_params,
            python_params: req.python_params,
            jar_params: req.jar_params,
            pipeline_params: req.pipeline_params,
            sql_params: req.sql_params,
            dbt_commands: req.dbt_commands,
            idempotency_token: req.idempotency_token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_id_parse() {
        assert_eq!(JobId::parse("123456789").unwrap(), JobId::new(123456789));
        assert_eq!(JobId::parse("  42 ").unwrap().get(), 42);
    }

    #[test]
    fn test_job_id_rejects_bad_input() {
        assert!(matches!(JobId::parse(""), Err(ParamError::MissingJobId)));
        assert!(matches!(JobId::parse("   "), Err(ParamError::MissingJobId)));
        assert!(matches!(JobId::parse("abc"), Err(ParamError::InvalidJobId(_))));
        assert!(matches!(JobId::parse("-5"), Err(ParamError::InvalidJobId(_))));
        assert!(matches!(JobId::parse("0"), Err(ParamError::InvalidJobId(_))));
    }

    #[test]
    fn test_request_with_no_overrides() {
        let req = TriggerRequest::try_from(&TriggerArgs::new("123")).unwrap();
        let body = RunNowRequest::from(req);
        assert_eq!(body.job_id, JobId::new(123));
        assert!(!body.has_overrides());
        assert!(body.idempotency_token.is_none());
    }

    #[test]
    fn test_request_maps_every_field() {
        let args = TriggerArgs::new("7")
            .notebook_params(r#"{"start_date": "2024-01-01"}"#)
            .python_params(r#"["--mode", "production"]"#)
            .jar_params(r#"["arg1"]"#)
            .pipeline_params(r#"{"full_refresh": "true"}"#)
            .sql_params(r#"{"date": "2024-01-01"}"#)
            .dbt_commands(r#"["dbt run", "dbt test"]"#)
            .idempotency_token("token-1");

        let req = TriggerRequest::try_from(&args).unwrap();
        assert_eq!(
            req.notebook_params.as_ref().unwrap().get("start_date"),
            Some(&"2024-01-01".to_string())
        );
        assert_eq!(req.python_params.as_deref().unwrap(), ["--mode", "production"]);
        assert_eq!(req.jar_params.as_deref().unwrap(), ["arg1"]);
        assert_eq!(req.dbt_commands.as_ref().unwrap().len(), 2);
        assert_eq!(req.idempotency_token.as_deref(), Some("token-1"));
    }

    #[test]
    fn test_first_bad_param_aborts() {
        let args = TriggerArgs::new("7").sql_params("[\"not a map\"]");
        let err = TriggerRequest::try_from(&args).unwrap_err();
        assert!(matches!(err, ParamError::WrongShape { param: "sql_params", .. }));
    }

    #[test]
    fn test_args_from_tool_call_json() {
        let args: TriggerArgs = serde_json::from_str(
            r#"{"job_id": "555", "pipeline_params": "{\"full_refresh\": \"true\"}"}"#,
        )
        .unwrap();
        assert_eq!(args.job_id, "555");
        assert!(args.notebook_params.is_none());

        let req = TriggerRequest::try_from(&args).unwrap();
        assert!(req.pipeline_params.is_some());
    }

    #[test]
    fn test_args_reject_unknown_keys() {
        let err = serde_json::from_str::<TriggerArgs>(r#"{"job_id": "1", "params": "{}"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("unknown field"));
    }

    #[test]
    fn test_empty_token_is_kept() {
        let req = TriggerRequest::try_from(&TriggerArgs::new("1").idempotency_token("")).unwrap();
        assert_eq!(req.idempotency_token.as_deref(), Some(""));
    }
}
