//! Browser session model: UI state tracked per session id.

use kanji_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from `kanji_go.sessions`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Session {
    pub session_id: String,
    /// Username of the signed-in user, if any.
    pub curr_user: Option<String>,
    pub curr_jlpt_level: String,
    pub curr_page: String,
    pub contact_popup_active: bool,
    pub login_popup_active: bool,
    pub payment_popup_active: bool,
    pub left_sidebar_active: bool,
    pub dark_mode_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a session. Flags start `false`.
#[derive(Debug, Clone)]
pub struct CreateSession {
    pub session_id: String,
    pub curr_user: Option<String>,
    /// Defaults to `n5` if omitted.
    pub curr_jlpt_level: Option<String>,
    /// Defaults to `home` if omitted.
    pub curr_page: Option<String>,
}

/// Partial preference update. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSessionPreferences {
    pub curr_user: Option<String>,
    pub curr_jlpt_level: Option<String>,
    pub curr_page: Option<String>,
    pub contact_popup_active: Option<bool>,
    pub login_popup_active: Option<bool>,
    pub payment_popup_active: Option<bool>,
    pub left_sidebar_active: Option<bool>,
    pub dark_mode_active: Option<bool>,
}
