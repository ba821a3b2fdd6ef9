//! Route tree.
//!
//! ```text
//! GET    /health                  service and database health (JSON)
//! GET    /                        full page
//! GET    /dialog                  dialog fragment
//! GET    /empty                   empty fragment
//! GET    /api/kanji               kanji card grid
//! POST   /api/kanji               insert kanji, returns its card
//! POST   /upload                  multipart image upload
//! GET    /list-files              uploaded image gallery
//! POST   /delete-file             delete one object
//! GET    /files/{*object_name}    stream one stored object
//! GET    /static/*                bundled assets
//! ```

pub mod files;
pub mod health;
pub mod kanji;
pub mod pages;

use axum::Router;

use crate::state::AppState;

/// Every application route except health and static assets.
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(pages::router())
        .merge(kanji::router())
        .merge(files::router())
}
