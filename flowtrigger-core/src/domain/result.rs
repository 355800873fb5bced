//! Trigger result types
//!
//! A [`TriggerResult`] is the only observable outcome of a trigger call. It
//! serializes to one of two JSON shapes, discriminated by `success`:
//!
//! ```json
//! {"success": true, "run_id": 42, "number_in_job": 1, "job_id": "123",
//!  "state": {"life_cycle_state": "PENDING", "state_message": ""},
//!  "run_page_url": "https://...", "start_time": 1700000000000,
//!  "message": "Successfully triggered job 123. Run ID: 42"}
//!
//! {"success": false, "job_id": "123", "error": "...",
//!  "error_type": "NotFound", "message": "Failed to trigger job 123: ..."}
//! ```

use serde::{Deserialize, Serialize};

/// Classification of a failed trigger, reported as `error_type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaultKind {
    /// Malformed or missing caller input; no remote call was made
    ParameterError,
    /// No workspace host or credentials could be resolved
    ConfigurationError,
    /// The job does not exist or is not visible to the caller
    NotFound,
    /// The caller may not run this job
    PermissionDenied,
    /// Credentials were rejected
    Unauthenticated,
    /// The service rejected the request as malformed
    BadRequest,
    /// The request conflicts with current service state
    ResourceConflict,
    /// Rate limit or quota exceeded
    TooManyRequests,
    /// Service-side failure
    ServerError,
    /// The request never completed (connection, TLS, timeout)
    TransportError,
    /// The service replied with a body that could not be understood
    InvalidResponse,
    /// Any other remote fault
    ApiError,
}

impl FaultKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ParameterError => "ParameterError",
            Self::ConfigurationError => "ConfigurationError",
            Self::NotFound => "NotFound",
            Self::PermissionDenied => "PermissionDenied",
            Self::Unauthenticated => "Unauthenticated",
            Self::BadRequest => "BadRequest",
            Self::ResourceConflict => "ResourceConflict",
            Self::TooManyRequests => "TooManyRequests",
            Self::ServerError => "ServerError",
            Self::TransportError => "TransportError",
            Self::InvalidResponse => "InvalidResponse",
            Self::ApiError => "ApiError",
        }
    }
}

impl std::fmt::Display for FaultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse run status as reported by the service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    pub life_cycle_state: Option<String>,
    pub state_message: Option<String>,
}

/// Details of a run the service has accepted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedRun {
    pub run_id: i64,
    pub number_in_job: Option<i64>,
    pub state: RunState,
    pub run_page_url: Option<String>,
    /// Epoch milliseconds
    pub start_time: Option<i64>,
}

/// Success shape of a trigger result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunTriggered {
    pub success: bool,
    pub run_id: i64,
    pub number_in_job: Option<i64>,
    pub job_id: String,
    pub state: RunState,
    pub run_page_url: Option<String>,
    pub start_time: Option<i64>,
    pub message: String,
}

/// Failure shape of a trigger result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerFailure {
    pub success: bool,
    pub job_id: String,
    pub error: String,
    pub error_type: FaultKind,
    pub message: String,
}

/// Outcome of one trigger invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TriggerResult {
    Triggered(RunTriggered),
    Failed(TriggerFailure),
}

impl TriggerResult {
    /// Build the success result for `job_id` (echoed as supplied)
    pub fn triggered(job_id: &str, run: SubmittedRun) -> Self {
        Self::Triggered(RunTriggered {
            success: true,
            run_id: run.run_id,
            number_in_job: run.number_in_job,
            job_id: job_id.to_string(),
            state: run.state,
            run_page_url: run.run_page_url,
            start_time: run.start_time,
            message: format!(
                "Successfully triggered job {}. Run ID: {}",
                job_id, run.run_id
            ),
        })
    }

    /// Build the failure result for `job_id` (echoed as supplied)
    pub fn failed(job_id: &str, kind: FaultKind, error: impl Into<String>) -> Self {
        let error = error.into();
        Self::Failed(TriggerFailure {
            success: false,
            job_id: job_id.to_string(),
            message: format!("Failed to trigger job {}: {}", job_id, error),
            error,
            error_type: kind,
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Triggered(_))
    }

    pub fn job_id(&self) -> &str {
        match self {
            Self::Triggered(run) => &run.job_id,
            Self::Failed(failure) => &failure.job_id,
        }
    }

    pub fn run_id(&self) -> Option<i64> {
        match self {
            Self::Triggered(run) => Some(run.run_id),
            Self::Failed(_) => None,
        }
    }

    pub fn fault_kind(&self) -> Option<FaultKind> {
        match self {
            Self::Triggered(_) => None,
            Self::Failed(failure) => Some(failure.error_type),
        }
    }

    /// Serialize as pretty-printed JSON
    ///
    /// Never fails: if serialization somehow does, a minimal failure record
    /// is produced instead.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| {
            serde_json::json!({
                "success": false,
                "job_id": self.job_id(),
                "error": e.to_string(),
                "error_type": FaultKind::ApiError,
                "message": format!("Failed to serialize result for job {}: {}", self.job_id(), e),
            })
            .to_string()
        })
    }
}
