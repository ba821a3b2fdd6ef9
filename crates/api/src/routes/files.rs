use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use kanji_core::uploads::MAX_UPLOAD_BYTES;

use crate::handlers::files;
use crate::state::AppState;

/// ```text
/// POST   /upload                  -> upload (body capped at 5 MiB)
/// GET    /list-files              -> list_files
/// POST   /delete-file             -> delete_file
/// GET    /files/{*object_name}    -> serve_file
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/upload",
            post(files::upload).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/list-files", get(files::list_files))
        .route("/delete-file", post(files::delete_file))
        .route("/files/{*object_name}", get(files::serve_file))
}
