use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use super::error_response;

/// Rejected caller input. The numeric core never fails; everything it would
/// silently accept but a user should not send is caught here.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{flag} must be {requirement}")]
    OutOfRange {
        flag: &'static str,
        requirement: String,
    },
    #[error("{flag} is required when {other} is set")]
    MissingCompanion {
        flag: &'static str,
        other: &'static str,
    },
    #[error("--contribution-change year {0} is listed more than once")]
    DuplicateChangeYear(u32),
    #[error("invalid --contribution-change `{0}`, expected YEAR:AMOUNT")]
    MalformedChange(String),
}

impl ValidationError {
    pub(crate) fn out_of_range(flag: &'static str, requirement: impl Into<String>) -> Self {
        Self::OutOfRange {
            flag,
            requirement: requirement.into(),
        }
    }
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        error_response(StatusCode::BAD_REQUEST, &self.to_string())
    }
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("failed to encode projection: {0}")]
    Encode(#[from] serde_json::Error),
}
