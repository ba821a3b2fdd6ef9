//! Repository for the `kanji_go.users` table.

use kanji_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, User};

const COLUMNS: &str = "id, email, username, password_hash, kanji_packs, starred_kanji, \
                       saved_kanji, created_at, updated_at";

pub struct UserRepo;

impl UserRepo {
    /// Insert a new user. Duplicate email or username fails with a unique
    /// violation (`uq_users_email` / `uq_users_username`).
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO kanji_go.users (email, username, password_hash)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.username)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM kanji_go.users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM kanji_go.users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Star a kanji for a user. Starring twice is a no-op.
    ///
    /// Returns the updated user, or `None` if the user does not exist.
    pub async fn add_starred_kanji(
        pool: &PgPool,
        user_id: DbId,
        kanji_char_id: DbId,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE kanji_go.users SET
                starred_kanji = CASE
                    WHEN $2 = ANY(starred_kanji) THEN starred_kanji
                    ELSE array_append(starred_kanji, $2)
                END,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(user_id)
            .bind(kanji_char_id)
            .fetch_optional(pool)
            .await
    }
}
