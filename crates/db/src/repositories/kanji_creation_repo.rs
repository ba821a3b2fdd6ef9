//! Repository for the `kanji_go.kanji_creations` table.

use kanji_core::types::DbId;
use sqlx::PgPool;

use crate::models::kanji_creation::{CreateKanjiCreation, KanjiCreation};

const COLUMNS: &str = "kanji_creation_id, kanji_char_id, created_by, created_date, image_url, \
                       mapping_url, explanation, is_public, stars, flags, updated_at";

/// Provides create/read operations and counter bumps for kanji creations.
///
/// Rows are never hard-deleted.
pub struct KanjiCreationRepo;

impl KanjiCreationRepo {
    /// Insert a new creation, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateKanjiCreation,
    ) -> Result<KanjiCreation, sqlx::Error> {
        let query = format!(
            "INSERT INTO kanji_go.kanji_creations
                (kanji_char_id, created_by, image_url, mapping_url, explanation, is_public)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, FALSE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, KanjiCreation>(&query)
            .bind(input.kanji_char_id)
            .bind(&input.created_by)
            .bind(&input.image_url)
            .bind(&input.mapping_url)
            .bind(&input.explanation)
            .bind(input.is_public)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<KanjiCreation>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM kanji_go.kanji_creations WHERE kanji_creation_id = $1");
        sqlx::query_as::<_, KanjiCreation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Public creations for a kanji, most starred first, then oldest first.
    pub async fn list_public_for_kanji(
        pool: &PgPool,
        kanji_char_id: DbId,
    ) -> Result<Vec<KanjiCreation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM kanji_go.kanji_creations
             WHERE kanji_char_id = $1 AND is_public = TRUE
             ORDER BY stars DESC, kanji_creation_id ASC"
        );
        sqlx::query_as::<_, KanjiCreation>(&query)
            .bind(kanji_char_id)
            .fetch_all(pool)
            .await
    }

    /// Add one star. Returns the new star count, or `None` if no such row.
    pub async fn increment_stars(pool: &PgPool, id: DbId) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE kanji_go.kanji_creations
             SET stars = stars + 1, updated_at = NOW()
             WHERE kanji_creation_id = $1
             RETURNING stars",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Add one flag. Returns the new flag count, or `None` if no such row.
    pub async fn increment_flags(pool: &PgPool, id: DbId) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE kanji_go.kanji_creations
             SET flags = flags + 1, updated_at = NOW()
             WHERE kanji_creation_id = $1
             RETURNING flags",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}
