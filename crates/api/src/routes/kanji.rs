use axum::routing::get;
use axum::Router;

use crate::handlers::kanji;
use crate::state::AppState;

/// ```text
/// GET    /api/kanji    -> list_kanji
/// POST   /api/kanji    -> create_kanji
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/api/kanji",
        get(kanji::list_kanji).post(kanji::create_kanji),
    )
}
