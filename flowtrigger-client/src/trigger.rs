//! Trigger routine
//!
//! Turns raw caller arguments into one run request, dispatches it, and
//! normalizes whatever happens into a [`TriggerResult`]:
//! - Bad input is rejected before any remote call
//! - Remote faults are classified via [`ClientError::fault_kind`]
//! - Nothing is retried; idempotency is left to the service

use flowtrigger_core::domain::job::{TriggerArgs, TriggerRequest};
use flowtrigger_core::domain::result::{FaultKind, TriggerResult};
use flowtrigger_core::dto::run::RunNowRequest;
use tracing::{info, warn};

use crate::error::ClientError;
use crate::jobs::JobsApi;
use crate::{Overrides, WorkspaceClient, WorkspaceConfig};

/// Trigger a job run and return the structured result
///
/// # Arguments
/// * `api` - The remote jobs service
/// * `args` - Raw arguments; structured ones are JSON strings
pub async fn trigger_flow<A>(api: &A, args: &TriggerArgs) -> TriggerResult
where
    A: JobsApi + ?Sized,
{
    match TriggerRequest::try_from(args) {
        Ok(request) => submit(api, &args.job_id, request).await,
        Err(e) => {
            warn!("Rejected trigger for job '{}': {}", args.job_id, e);
            TriggerResult::failed(&args.job_id, FaultKind::ParameterError, e.to_string())
        }
    }
}

/// Trigger a job run and return the result as a JSON string
///
/// This is the function exposed to agents. It never fails; callers branch
/// on the `success` field.
pub async fn trigger_flow_json<A>(api: &A, args: &TriggerArgs) -> String
where
    A: JobsApi + ?Sized,
{
    trigger_flow(api, args).await.to_json()
}

/// Trigger a job run using credentials from the default chain
///
/// Arguments are validated before credentials are resolved, so bad input
/// never touches the environment or the network.
pub async fn trigger_with_default_credentials(args: &TriggerArgs) -> String {
    trigger_with_env(args, |key| std::env::var(key).ok()).await
}

/// Trigger using credentials resolved through `env`
async fn trigger_with_env<F>(args: &TriggerArgs, env: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let request = match TriggerRequest::try_from(args) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejected trigger for job '{}': {}", args.job_id, e);
            return TriggerResult::failed(&args.job_id, FaultKind::ParameterError, e.to_string())
                .to_json();
        }
    };

    let client = match WorkspaceConfig::resolve_with(Overrides::default(), env) {
        Ok(config) => WorkspaceClient::new(config),
        Err(e) => return failure(&args.job_id, &e).to_json(),
    };

    submit(&client, &args.job_id, request).await.to_json()
}

/// Dispatch an already validated request
///
/// # Arguments
/// * `api` - The remote jobs service
/// * `job_label` - The job id as the caller supplied it, echoed in the result
/// * `request` - The validated request
pub async fn submit<A>(api: &A, job_label: &str, request: TriggerRequest) -> TriggerResult
where
    A: JobsApi + ?Sized,
{
    let body = RunNowRequest::from(request);
    info!(
        "Triggering job {} (overrides: {}, idempotency token: {})",
        body.job_id,
        body.has_overrides(),
        body.idempotency_token.is_some()
    );

    match api.submit_run(&body).await {
        Ok(run) => {
            info!("Job {} triggered, run {}", body.job_id, run.run_id);
            TriggerResult::triggered(job_label, run)
        }
        Err(e) => failure(job_label, &e),
    }
}

fn failure(job_label: &str, err: &ClientError) -> TriggerResult {
    let kind = err.fault_kind();
    warn!("Failed to trigger job {} ({}): {}", job_label, kind, err);
    TriggerResult::failed(job_label, kind, err.to_string())
}
