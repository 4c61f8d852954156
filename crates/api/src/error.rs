//! HTTP error handling.
//!
//! [`AppError`] is what every handler returns on failure. Conversion into
//! a response happens in one place so the `{"error", "code"}` body shape
//! stays uniform across the API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use depot_core::error::CoreError;
use serde_json::json;

/// Error type for HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `depot_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Convenience alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// What a failed request answers with.
#[derive(Debug, PartialEq, Eq)]
struct ErrorReply {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ErrorReply {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    /// A 500 with the details kept out of the body.
    fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "An internal error occurred",
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let reply = match &self {
            AppError::Core(err) => core_reply(err),
            AppError::Database(err) => database_reply(err),
        };

        let body = json!({
            "error": reply.message,
            "code": reply.code,
        });
        (reply.status, axum::Json(body)).into_response()
    }
}

fn core_reply(err: &CoreError) -> ErrorReply {
    let (status, code) = match err {
        CoreError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        CoreError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
    };
    ErrorReply::new(status, code, err.to_string())
}

/// Map a sqlx error onto a client answer.
///
/// `RowNotFound` is a 404, a unique violation (Postgres 23505) is a 409
/// naming the constraint, and anything else is logged and answered with a
/// sanitized 500.
fn database_reply(err: &sqlx::Error) -> ErrorReply {
    if matches!(err, sqlx::Error::RowNotFound) {
        return ErrorReply::new(StatusCode::NOT_FOUND, "NOT_FOUND", "Resource not found");
    }

    if let sqlx::Error::Database(db_err) = err {
        if db_err.code().as_deref() == Some("23505") {
            let constraint = db_err.constraint().unwrap_or("unknown");
            return ErrorReply::new(
                StatusCode::CONFLICT,
                "CONFLICT",
                format!("Duplicate value violates unique constraint: {constraint}"),
            );
        }
    }

    tracing::error!(error = %err, "Database error");
    ErrorReply::internal()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
