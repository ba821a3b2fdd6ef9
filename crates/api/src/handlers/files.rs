//! Uploaded image storage: upload, gallery, delete and direct serving.

use std::time::Duration;

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse};
use axum::Form;
use kanji_cloud::{with_timeout, StorageError};
use kanji_core::uploads::{
    content_type_for, is_allowed_file_type, object_key, public_url, unique_filename,
    validate_image_filename, UPLOAD_PREFIX,
};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::csrf::CsrfToken;
use crate::state::AppState;
use crate::views::files::{delete_success, files_gallery, upload_success};

/// Bound on the object write for one upload.
pub const UPLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Bound on list, read and delete calls.
pub const STORAGE_TIMEOUT: Duration = Duration::from_secs(30);

const IMAGE_FIELD: &str = "image";
const KANJI_ID_FIELD: &str = "kanji_char_id";

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("File too large".into())
    } else {
        AppError::BadRequest(format!("Invalid form: {}", err.body_text()))
    }
}

/// POST /upload
///
/// Multipart form with an `image` file and optional `kanji_char_id`. The body
/// limit on the route rejects oversized requests before anything is written.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Html<String>> {
    let mut image = None;
    let mut kanji_id = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(IMAGE_FIELD) => {
                let filename = field
                    .file_name()
                    .map(str::to_owned)
                    .ok_or_else(|| AppError::BadRequest("Error retrieving file".into()))?;
                if let Err(e) = validate_image_filename(&filename) {
                    tracing::warn!(filename = %filename, "Rejected upload with disallowed extension");
                    return Err(e.into());
                }
                let data = field.bytes().await.map_err(multipart_error)?;
                image = Some((filename, data));
            }
            Some(KANJI_ID_FIELD) => {
                let value = field.text().await.map_err(multipart_error)?;
                kanji_id = Some(value.trim().to_string()).filter(|v| !v.is_empty());
            }
            _ => {}
        }
    }

    let (original, data) =
        image.ok_or_else(|| AppError::BadRequest("Error retrieving file".into()))?;

    let key = object_key(&unique_filename(&original));
    let content_type = content_type_for(&original);
    tracing::info!(
        filename = %original,
        object_name = %key,
        bytes = data.len(),
        content_type,
        "Uploading file",
    );

    let written = with_timeout(
        UPLOAD_TIMEOUT,
        "upload",
        state.store.put_object(&key, data, content_type),
    )
    .await?;

    let url = public_url(state.store.bucket(), &key);
    tracing::info!(object_name = %key, bytes = written, kanji_id = ?kanji_id, "Upload complete");

    Ok(Html(upload_success(&url, kanji_id.as_deref())))
}

/// GET /list-files
///
/// Every image under the upload prefix; other object types are skipped.
pub async fn list_files(
    State(state): State<AppState>,
    csrf: CsrfToken,
) -> AppResult<Html<String>> {
    let objects = with_timeout(
        STORAGE_TIMEOUT,
        "list",
        state.store.list_objects(UPLOAD_PREFIX),
    )
    .await?;

    let total = objects.len();
    let images: Vec<_> = objects
        .into_iter()
        .filter(|object| is_allowed_file_type(&object.name))
        .collect();
    tracing::debug!(total, images = images.len(), "Listed uploaded files");

    Ok(Html(files_gallery(
        state.store.bucket(),
        &images,
        csrf.as_str(),
    )))
}

/// Urlencoded body of `POST /delete-file`.
#[derive(Debug, Deserialize)]
pub struct DeleteFileForm {
    #[serde(rename = "objectName")]
    pub object_name: Option<String>,
}

/// POST /delete-file
///
/// Deletes without checking existence first, so a missing object surfaces as
/// a server error like any other storage failure.
pub async fn delete_file(
    State(state): State<AppState>,
    csrf: CsrfToken,
    Form(form): Form<DeleteFileForm>,
) -> AppResult<Html<String>> {
    let object_name = form
        .object_name
        .filter(|name| !name.is_empty())
        .ok_or_else(|| AppError::BadRequest("Object name not provided".into()))?;

    tracing::info!(object_name = %object_name, "Deleting file");
    with_timeout(
        STORAGE_TIMEOUT,
        "delete",
        state.store.delete_object(&object_name),
    )
    .await?;
    tracing::info!(object_name = %object_name, "File deleted");

    Ok(Html(delete_success(csrf.as_str())))
}

/// GET /files/{*object_name}
///
/// Streams a stored object back with its stored content type.
pub async fn serve_file(
    State(state): State<AppState>,
    Path(object_name): Path<String>,
) -> AppResult<impl IntoResponse> {
    let object = with_timeout(
        STORAGE_TIMEOUT,
        "read",
        state.store.get_object(&object_name),
    )
    .await
    .map_err(|err| match err {
        StorageError::NotFound { .. } => AppError::NotFound("File not found".into()),
        other => AppError::Storage(other),
    })?;

    Ok(([(header::CONTENT_TYPE, object.content_type)], object.body))
}
