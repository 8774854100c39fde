use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde_json::json;
use studygroup_core::error::CoreError;
use studygroup_core::import::{ImportError, ImportFailure};

/// Error type returned by every handler.
///
/// Wraps [`CoreError`] and raw sqlx errors, and carries the import
/// pipeline's [`ImportFailure`] taxonomy. [`IntoResponse`] renders import,
/// validation, and uniqueness failures as the structured
/// `{timestamp, message, errors}` envelope and everything else as a plain
/// `{error, code}` body.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A failed import attempt, classified by pipeline stage.
    #[error(transparent)]
    Import(#[from] ImportFailure),

    /// Aggregated field-validation findings outside the import pipeline.
    #[error("Validation failed with {} error(s)", .0.len())]
    Validation(Vec<ImportError>),

    /// Aggregated business-uniqueness conflicts outside the import pipeline.
    #[error("Unique constraints validation failed")]
    Unique(Vec<ImportError>),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => plain_response(
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    plain_response(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg)
                }
                CoreError::Conflict(msg) => plain_response(StatusCode::CONFLICT, "CONFLICT", msg),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    plain_response(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            AppError::Database(err) => classify_sqlx_error(&err),

            AppError::Import(failure) => {
                let status = match &failure {
                    ImportFailure::Uniqueness(_) => StatusCode::CONFLICT,
                    ImportFailure::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
                    _ => StatusCode::BAD_REQUEST,
                };
                envelope_response(status, "Import failed", failure.errors())
            }
            AppError::Validation(errors) => {
                envelope_response(StatusCode::BAD_REQUEST, "Validation failed", &errors)
            }
            AppError::Unique(errors) => envelope_response(
                StatusCode::CONFLICT,
                "Unique constraints validation failed",
                &errors,
            ),

            AppError::BadRequest(msg) => plain_response(StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
        }
    }
}

/// `{timestamp, message, errors}` envelope carrying descriptor triples.
fn envelope_response(status: StatusCode, message: &str, errors: &[ImportError]) -> Response {
    let body = json!({
        "timestamp": Utc::now(),
        "message": message,
        "errors": errors,
    });
    (status, axum::Json(body)).into_response()
}

fn plain_response(status: StatusCode, code: &'static str, message: String) -> Response {
    let body = json!({
        "error": message,
        "code": code,
    });
    (status, axum::Json(body)).into_response()
}

/// Map a raw sqlx error onto a response without leaking internals.
///
/// `RowNotFound` is a 404; a violation of one of the `uq_`-prefixed
/// unique indexes is a 409; anything else logs and answers a generic 500.
fn classify_sqlx_error(err: &sqlx::Error) -> Response {
    match err {
        sqlx::Error::RowNotFound => plain_response(
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // 23505 = PostgreSQL unique_violation
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return plain_response(
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            plain_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            plain_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
