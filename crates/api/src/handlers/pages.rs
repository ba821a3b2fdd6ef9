//! Full page and static fragments.

use axum::extract::State;
use axum::response::Html;

use crate::error::AppError;
use crate::middleware::csrf::CsrfToken;
use crate::state::AppState;
use crate::views::pages::{DIALOG, HOME_MESSAGE, HOME_TITLE};

/// GET /
///
/// Full page with the CSRF token embedded for later form posts.
pub async fn home(State(state): State<AppState>, csrf: CsrfToken) -> Html<String> {
    Html(
        state
            .templates
            .render_page(HOME_TITLE, HOME_MESSAGE, csrf.as_str()),
    )
}

/// GET /dialog
pub async fn dialog() -> Html<&'static str> {
    Html(DIALOG)
}

/// GET /empty
///
/// Empty body the front end swaps in to clear a container.
pub async fn empty() -> Html<&'static str> {
    Html("")
}

/// Fallback for a known path hit with the wrong method.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
