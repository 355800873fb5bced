//! Job-related API endpoints

use async_trait::async_trait;
use flowtrigger_core::domain::result::SubmittedRun;
use flowtrigger_core::dto::run::{Run, RunNowRequest, RunNowResponse};
use tracing::{debug, warn};

use crate::WorkspaceClient;
use crate::error::Result;

/// The remote workflow operation the trigger routine depends on
///
/// Implemented by [`WorkspaceClient`]; tests substitute their own doubles.
#[async_trait]
pub trait JobsApi: Send + Sync {
    /// Starts a run of the requested job and reports what the service
    /// accepted
    ///
    /// # Arguments
    /// * `request` - Job id, per-task overrides and idempotency token, sent
    ///   unmodified
    async fn submit_run(&self, request: &RunNowRequest) -> Result<SubmittedRun>;
}

impl WorkspaceClient {
    // =============================================================================
    // Job Runs
    // =============================================================================

    /// Trigger a run of an existing job
    ///
    /// # Arguments
    /// * `req` - The run-now request
    ///
    /// # Returns
    /// The new run's id and sequence number
    ///
    /// # Example
    /// ```no_run
    /// # use flowtrigger_client::{WorkspaceClient, WorkspaceConfig};
    /// # use flowtrigger_core::domain::job::JobId;
    /// # use flowtrigger_core::dto::run::RunNowRequest;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = WorkspaceClient::new(WorkspaceConfig::from_env()?);
    /// let ack = client.run_now(&RunNowRequest::new(JobId::new(123456789))).await?;
    /// println!("Started run {}", ack.run_id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run_now(&self, req: &RunNowRequest) -> Result<RunNowResponse> {
        let url = format!("{}/api/2.1/jobs/run-now", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(req)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Get a run by ID
    ///
    /// # Arguments
    /// * `run_id` - The run identifier
    ///
    /// # Returns
    /// The run details
    pub async fn get_run(&self, run_id: i64) -> Result<Run> {
        let url = format!("{}/api/2.1/jobs/runs/get", self.base_url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .query(&[("run_id", run_id)])
            .send()
            .await?;

        self.handle_response(response).await
    }
}

#[async_trait]
impl JobsApi for WorkspaceClient {
    async fn submit_run(&self, request: &RunNowRequest) -> Result<SubmittedRun> {
        let ack = self.run_now(request).await?;
        debug!("Run {} accepted for job {}", ack.run_id, request.job_id);

        // The run exists once run-now succeeds; a failed lookup must not
        // turn it into a failure.
        match self.get_run(ack.run_id).await {
            Ok(run) => Ok(run.into_submitted(&ack)),
            Err(e) => {
                warn!("Run {} started but its details are unavailable: {}", ack.run_id, e);
                Ok(ack.into_submitted())
            }
        }
    }
}
