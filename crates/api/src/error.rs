use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use carbontune_core::error::CoreError;
use carbontune_core::estimation::EstimationError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] and [`EstimationError`] for domain errors and adds
/// HTTP-specific variants. Implements [`IntoResponse`] to produce consistent
/// JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `carbontune_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The estimation engine rejected the request.
    #[error(transparent)]
    Estimation(#[from] EstimationError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A dependency is not ready yet (the region table is still loading).
    #[error("Service unavailable: {0}")]
    StoreUnavailable(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => {
                    let message = format!("{entity} with id {id} not found");
                    // Dashboard clients read `message` on 404s.
                    let body = json!({
                        "error": message,
                        "message": message,
                        "code": "NOT_FOUND",
                    });
                    return (StatusCode::NOT_FOUND, axum::Json(body)).into_response();
                }
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
            },

            // --- Estimation engine ---
            AppError::Estimation(err) => {
                let (status, code) = classify_estimation_error(err);
                (status, code, err.to_string())
            }

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::StoreUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "STORE_UNAVAILABLE",
                msg.clone(),
            ),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Map an engine error to its HTTP status and error code.
///
/// Input problems the user can fix in the form are 400; well-formed requests
/// the reference data cannot answer are 422.
fn classify_estimation_error(err: &EstimationError) -> (StatusCode, &'static str) {
    match err {
        EstimationError::IncompleteParameters(_) => {
            (StatusCode::BAD_REQUEST, "INCOMPLETE_PARAMETERS")
        }
        EstimationError::UnknownRegion(_) => (StatusCode::BAD_REQUEST, "UNKNOWN_REGION"),
        EstimationError::UnknownGpu(_) => (StatusCode::BAD_REQUEST, "UNKNOWN_GPU"),
        EstimationError::UnsupportedConfiguration { .. } => {
            (StatusCode::UNPROCESSABLE_ENTITY, "UNSUPPORTED_CONFIGURATION")
        }
        EstimationError::MissingBatchTimingData { .. } => {
            (StatusCode::UNPROCESSABLE_ENTITY, "MISSING_BATCH_TIMING_DATA")
        }
        EstimationError::DegenerateRuntime => {
            (StatusCode::UNPROCESSABLE_ENTITY, "DEGENERATE_RUNTIME")
        }
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Check constraint violations (`ck_` prefix) map to 400.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL check constraint violation: error code 23514
            if db_err.code().as_deref() == Some("23514") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("ck_") {
                    return (
                        StatusCode::BAD_REQUEST,
                        "VALIDATION_ERROR",
                        format!("Value violates check constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
