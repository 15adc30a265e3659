//! Submission interface error types

use thiserror::Error;

/// Errors crossing the provisioning-engine boundary
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("plan rejected by the provisioning engine: {0}")]
    PlanRejected(String),

    #[error("engine API error: {0}")]
    ApiError(String),

    #[error("unsupported resource kind: {0}")]
    UnsupportedResource(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CloudError>;
