//! Mapping of service failures onto HTTP responses.

use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use log::error;
use marina_core::{ErrorKind, MarinaError, ValidationError};
use serde_json::json;
use std::fmt::{Display, Formatter};

/// Error returned by every marina handler.
#[derive(Debug)]
pub enum ApiError {
    Marina(MarinaError),
    /// Mutating collection routes need a resource id.
    MissingId,
    /// The blocking store task did not finish.
    Worker(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingId => StatusCode::FORBIDDEN,
            Self::Worker(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Marina(err) => match err.kind() {
                ErrorKind::Validation => StatusCode::BAD_REQUEST,
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::Forbidden => StatusCode::FORBIDDEN,
                ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Marina(err) => write!(f, "{err}"),
            Self::MissingId => write!(f, "resource id required"),
            Self::Worker(details) => write!(f, "store task failed: {details}"),
        }
    }
}

impl From<MarinaError> for ApiError {
    fn from(value: MarinaError) -> Self {
        Self::Marina(value)
    }
}

impl From<ValidationError> for ApiError {
    fn from(value: ValidationError) -> Self {
        Self::Marina(value.into())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(value: QueryRejection) -> Self {
        ValidationError::Malformed(value.body_text()).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(
                "event=http_error module=http status=error http_status={} error={}",
                status.as_u16(),
                self
            );
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
