//! Repository for the `kanji_go.sessions` table.

use sqlx::PgPool;

use crate::models::session::{CreateSession, Session, UpdateSessionPreferences};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "session_id, curr_user, curr_jlpt_level, curr_page, contact_popup_active, \
                       login_popup_active, payment_popup_active, left_sidebar_active, \
                       dark_mode_active, created_at, updated_at";

/// Provides CRUD operations for browser sessions.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new session, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSession) -> Result<Session, sqlx::Error> {
        let query = format!(
            "INSERT INTO kanji_go.sessions (session_id, curr_user, curr_jlpt_level, curr_page)
             VALUES ($1, $2, COALESCE($3, 'n5'), COALESCE($4, 'home'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(&input.session_id)
            .bind(&input.curr_user)
            .bind(&input.curr_jlpt_level)
            .bind(&input.curr_page)
            .fetch_one(pool)
            .await
    }

    pub async fn find(pool: &PgPool, session_id: &str) -> Result<Option<Session>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM kanji_go.sessions WHERE session_id = $1");
        sqlx::query_as::<_, Session>(&query)
            .bind(session_id)
            .fetch_optional(pool)
            .await
    }

    /// Apply a partial preference update and bump `updated_at`.
    ///
    /// Returns `None` if no session with the given id exists.
    pub async fn update_preferences(
        pool: &PgPool,
        session_id: &str,
        input: &UpdateSessionPreferences,
    ) -> Result<Option<Session>, sqlx::Error> {
        let query = format!(
            "UPDATE kanji_go.sessions SET
                curr_user = COALESCE($2, curr_user),
                curr_jlpt_level = COALESCE($3, curr_jlpt_level),
                curr_page = COALESCE($4, curr_page),
                contact_popup_active = COALESCE($5, contact_popup_active),
                login_popup_active = COALESCE($6, login_popup_active),
                payment_popup_active = COALESCE($7, payment_popup_active),
                left_sidebar_active = COALESCE($8, left_sidebar_active),
                dark_mode_active = COALESCE($9, dark_mode_active),
                updated_at = NOW()
             WHERE session_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(session_id)
            .bind(&input.curr_user)
            .bind(&input.curr_jlpt_level)
            .bind(&input.curr_page)
            .bind(input.contact_popup_active)
            .bind(input.login_popup_active)
            .bind(input.payment_popup_active)
            .bind(input.left_sidebar_active)
            .bind(input.dark_mode_active)
            .fetch_optional(pool)
            .await
    }
}
