//! Run DTOs for the Databricks Jobs API 2.1

use serde::{Deserialize, Serialize};

use crate::domain::job::JobId;
use crate::domain::result::{RunState, SubmittedRun};
use crate::params::{ParamList, ParamMap};

/// Body of `POST /api/2.1/jobs/run-now`
///
/// Only supplied overrides are serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunNowRequest {
    pub job_id: JobId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notebook_params: Option<ParamMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub python_params: Option<ParamList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jar_params: Option<ParamList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline_params: Option<ParamMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql_params: Option<ParamMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dbt_commands: Option<ParamList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idempotency_token: Option<String>,
}

impl RunNowRequest {
    /// Request a run of `job_id` with no overrides
    pub fn new(job_id: JobId) -> Self {
        Self {
            job_id,
            notebook_params: None,
            python_params: None,
            jar_params: None,
            pipeline_params: None,
            sql_params: None,
            dbt_commands: None,
            idempotency_token: None,
        }
    }

    /// Whether any per-task parameter override is set
    pub fn has_overrides(&self) -> bool {
        self.notebook_params.is_some()
            || self.python_params.is_some()
            || self.jar_params.is_some()
            || self.pipeline_params.is_some()
            || self.sql_params.is_some()
            || self.dbt_commands.is_some()
    }
}

/// Response of `POST /api/2.1/jobs/run-now`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunNowResponse {
    pub run_id: i64,
    #[serde(default)]
    pub number_in_job: Option<i64>,
}

impl RunNowResponse {
    /// Describe the accepted run from the acknowledgement alone
    ///
    /// Used when run details are unavailable; state, page URL and start time
    /// stay unset.
    pub fn into_submitted(self) -> SubmittedRun {
        SubmittedRun {
            run_id: self.run_id,
            number_in_job: self.number_in_job,
            state: RunState::default(),
            run_page_url: None,
            start_time: None,
        }
    }
}

/// Run state as reported by `GET /api/2.1/jobs/runs/get`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStateDto {
    #[serde(default)]
    pub life_cycle_state: Option<String>,
    #[serde(default)]
    pub state_message: Option<String>,
}

/// Subset of `GET /api/2.1/jobs/runs/get` needed to describe a new run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub run_id: i64,
    #[serde(default)]
    pub number_in_job: Option<i64>,
    #[serde(default)]
    pub state: Option<RunStateDto>,
    #[serde(default)]
    pub run_page_url: Option<String>,
    #[serde(default)]
    pub start_time: Option<i64>,
}

impl Run {
    /// Merge run details with the run-now acknowledgement
    ///
    /// The acknowledgement's sequence number wins when present.
    pub fn into_submitted(self, ack: &RunNowResponse) -> SubmittedRun {
        let state = self.state.unwrap_or_default();
        SubmittedRun {
            run_id: ack.run_id,
            number_in_job: ack.number_in_job.or(self.number_in_job),
            state: RunState {
                life_cycle_state: state.life_cycle_state,
                state_message: state.state_message,
            },
            run_page_url: self.run_page_url,
            start_time: self.start_time,
        }
    }
}

/// Error body returned by the Databricks REST API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
