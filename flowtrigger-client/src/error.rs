//! Error types for the workspace client

use flowtrigger_core::domain::result::FaultKind;
use flowtrigger_core::params::ParamError;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when using the workspace client
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("{message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Databricks error code (e.g. RESOURCE_DOES_NOT_EXIST)
        error_code: Option<String>,
        /// Error message from the API
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Workspace host or credentials could not be resolved
    #[error("Configuration error: {0}")]
    Config(String),

    /// Caller input rejected before any request was made
    #[error(transparent)]
    InvalidParameters(#[from] ParamError),
}

impl ClientError {
    /// Create an API error from status code, error code and message
    pub fn api_error(status: u16, error_code: Option<String>, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            error_code,
            message: message.into(),
        }
    }

    /// Classify this error for the `error_type` field of a trigger result
    pub fn fault_kind(&self) -> FaultKind {
        match self {
            Self::RequestFailed(e) if e.is_decode() => FaultKind::InvalidResponse,
            Self::RequestFailed(_) => FaultKind::TransportError,
            Self::ApiError {
                status, error_code, ..
            } => error_code
                .as_deref()
                .and_then(classify_error_code)
                .unwrap_or_else(|| classify_status(*status)),
            Self::ParseError(_) => FaultKind::InvalidResponse,
            Self::Config(_) => FaultKind::ConfigurationError,
            Self::InvalidParameters(_) => FaultKind::ParameterError,
        }
    }
}

/// Map a Databricks `error_code` to a fault kind
///
/// Unknown codes return `None` so the HTTP status decides.
fn classify_error_code(code: &str) -> Option<FaultKind> {
    let kind = match code {
        "RESOURCE_DOES_NOT_EXIST" | "NOT_FOUND" | "FEATURE_DISABLED" => FaultKind::NotFound,
        "PERMISSION_DENIED" => FaultKind::PermissionDenied,
        "UNAUTHENTICATED" => FaultKind::Unauthenticated,
        "INVALID_PARAMETER_VALUE" | "MALFORMED_REQUEST" | "BAD_REQUEST" | "INVALID_STATE" => {
            FaultKind::BadRequest
        }
        "RESOURCE_CONFLICT" | "RESOURCE_ALREADY_EXISTS" | "ABORTED" | "ALREADY_EXISTS" => {
            FaultKind::ResourceConflict
        }
        "REQUEST_LIMIT_EXCEEDED" | "RESOURCE_EXHAUSTED" | "QUOTA_EXCEEDED" | "TOO_MANY_REQUESTS" => {
            FaultKind::TooManyRequests
        }
        "INTERNAL_ERROR" | "TEMPORARILY_UNAVAILABLE" | "DEADLINE_EXCEEDED" | "UNKNOWN" => {
            FaultKind::ServerError
        }
        _ => return None,
    };
    Some(kind)
}

fn classify_status(status: u16) -> FaultKind {
    match status {
        400 => FaultKind::BadRequest,
        401 => FaultKind::Unauthenticated,
        403 => FaultKind::PermissionDenied,
        404 => FaultKind::NotFound,
        409 => FaultKind::ResourceConflict,
        429 => FaultKind::TooManyRequests,
        500..=599 => FaultKind::ServerError,
        _ => FaultKind::ApiError,
    }
}
