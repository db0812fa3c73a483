use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Failure taxonomy for request handling. Every variant is terminal for its
/// request; there are no retries.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A required form field is missing or malformed.
    #[error("invalid submission: {0}")]
    Validation(String),

    /// An id did not resolve to a row.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Constraint violation or connection failure while talking to Postgres.
    #[error("database failure: {0}")]
    Persistence(#[from] sqlx::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Persistence(ref e) = self {
            tracing::error!("persistence error: {:?}", e);
        }

        // No structured detail leaves the handler boundary; callers get a
        // generic notice and the status code.
        let message = match &self {
            AppError::Validation(_) => "Invalid form submission.".to_string(),
            AppError::NotFound(what) => format!("{} not found", what),
            AppError::Persistence(_) => "An internal error occurred.".to_string(),
        };

        (
            self.status(),
            Json(json!({ "success": false, "message": message })),
        )
            .into_response()
    }
}
