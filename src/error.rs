use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Errors surfaced by the record endpoints.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The x-api-key header is missing or does not match the configured secret.
    #[error("missing or invalid API key")]
    Unauthorized,

    /// The request body failed validation before any store call.
    #[error("{0}")]
    Invalid(String),

    /// A uniqueness invariant (user name, asset symbol) would be violated.
    #[error("{0}")]
    Conflict(String),

    /// No record with the requested id exists.
    #[error("{0}")]
    NotFound(String),

    /// The store could not be reached or rejected the statement; fatal, not retried.
    #[error("store error: {0}")]
    Store(sqlx::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Invalid(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Self::Conflict("value already exists".into())
            }
            _ => Self::Store(e),
        }
    }
}

/// Maps a unique violation to a `Conflict` carrying `detail`, so a create or
/// update losing a race still names the duplicate value.
pub fn conflict_on_unique(e: sqlx::Error, detail: &str) -> ApiError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            ApiError::Conflict(detail.to_string())
        }
        _ => ApiError::Store(e),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        // Driver messages stay in the log, not in the response body.
        let detail = match &self {
            Self::Store(e) => {
                error!(error = %e, "store error");
                "store unavailable".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": detail }))).into_response()
    }
}
