//! Tests for `AppError` to HTTP response mapping.
//!
//! These call `IntoResponse` directly; no server or database is needed.

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use kanji_api::error::AppError;
use kanji_cloud::StorageError;
use kanji_core::error::CoreError;

/// Convert an `AppError` into its status code and body text.
async fn error_to_response(err: AppError) -> (StatusCode, String) {
    let response = err.into_response();
    let status = response.status();
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/plain; charset=utf-8"
    );
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn validation_error_returns_400_with_message() {
    let err = AppError::Core(CoreError::Validation("bad level".into()));
    assert_eq!(
        error_to_response(err).await,
        (StatusCode::BAD_REQUEST, "bad level".to_string())
    );
}

#[tokio::test]
async fn bad_request_returns_400() {
    let err = AppError::BadRequest("Object name not provided".into());
    let (status, body) = error_to_response(err).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Object name not provided");
}

#[tokio::test]
async fn payload_too_large_returns_413() {
    let (status, _) = error_to_response(AppError::PayloadTooLarge("File too large".into())).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn forbidden_returns_403() {
    let err = AppError::Core(CoreError::Forbidden("CSRF token missing or invalid".into()));
    let (status, body) = error_to_response(err).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, "CSRF token missing or invalid");
}

#[tokio::test]
async fn not_found_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Kanji",
        id: 42,
    });
    let (status, body) = error_to_response(err).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "Kanji with id 42 not found");

    let (status, _) = error_to_response(AppError::NotFound("File not found".into())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn method_not_allowed_returns_405() {
    let (status, _) = error_to_response(AppError::MethodNotAllowed).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn storage_errors_are_sanitized_500s() {
    for err in [
        StorageError::NotFound {
            key: "uploads/secret.png".into(),
        },
        StorageError::Timeout {
            operation: "delete",
            secs: 30,
        },
        StorageError::Backend("bucket credentials rejected".into()),
    ] {
        let (status, body) = error_to_response(AppError::Storage(err)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "Internal Server Error");
    }
}

#[tokio::test]
async fn invalid_object_key_is_400() {
    let err = StorageError::InvalidKey {
        key: "../etc/passwd".into(),
        reason: "relative path segment",
    };
    let (status, body) = error_to_response(AppError::Storage(err)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Invalid object name");
}

#[tokio::test]
async fn database_timeout_is_sanitized_500() {
    let err = AppError::DatabaseTimeout {
        operation: "list kanji",
        secs: 30,
    };
    let (status, body) = error_to_response(err).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Internal Server Error");
}

#[tokio::test]
async fn database_error_is_sanitized_500() {
    let (status, body) = error_to_response(AppError::Database(sqlx::Error::PoolTimedOut)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Internal Server Error");
}

#[tokio::test]
async fn internal_error_hides_details() {
    let err = AppError::InternalError("secret database credentials leaked".into());
    let (status, body) = error_to_response(err).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.contains("secret"));
}
