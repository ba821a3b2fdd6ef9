use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use kanji_cloud::StorageError;
use kanji_core::error::CoreError;
use kanji_db::error::TxError;

/// Generic body for every upstream failure; the cause is only logged.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Application-level error type for HTTP handlers.
///
/// The front end swaps response bodies straight into the page, so errors are
/// rendered as short `text/plain` messages rather than JSON.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `kanji_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database call outlived its per-operation bound.
    #[error("Database {operation} timed out after {secs}s")]
    DatabaseTimeout { operation: &'static str, secs: u64 },

    /// A failed insert transaction.
    #[error(transparent)]
    Transaction(#[from] TxError),

    /// An object storage failure.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Request body over the configured ceiling.
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// The requested resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => {
                    (StatusCode::NOT_FOUND, format!("{entity} with id {id} not found"))
                }
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                CoreError::Forbidden(msg) => {
                    tracing::warn!(reason = %msg, "Request forbidden");
                    (StatusCode::FORBIDDEN, msg.clone())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal()
                }
            },

            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                internal()
            }
            AppError::DatabaseTimeout { operation, secs } => {
                tracing::error!(operation, secs, "Database call timed out");
                internal()
            }
            AppError::Transaction(err) => {
                tracing::error!(error = %err, "Transaction failed");
                internal()
            }
            AppError::Storage(StorageError::InvalidKey { key, reason }) => {
                tracing::warn!(object_name = %key, reason, "Rejected object name");
                (StatusCode::BAD_REQUEST, "Invalid object name".to_string())
            }
            AppError::Storage(err) => {
                tracing::error!(error = %err, "Object storage error");
                internal()
            }

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method not allowed".to_string(),
            ),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            message,
        )
            .into_response()
    }
}

fn internal() -> (StatusCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        INTERNAL_ERROR_MESSAGE.to_string(),
    )
}
