//! Repository for the `kanji_go.temp_creations` table (drafts).

use kanji_core::types::DbId;
use sqlx::PgPool;

use crate::models::temp_creation::{CreateTempCreation, TempCreation};

const COLUMNS: &str =
    "temp_id, kanji_char_id, image_url, mapping_url, explanation, created_at";

pub struct TempCreationRepo;

impl TempCreationRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateTempCreation,
    ) -> Result<TempCreation, sqlx::Error> {
        let query = format!(
            "INSERT INTO kanji_go.temp_creations (kanji_char_id, image_url, mapping_url, explanation)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TempCreation>(&query)
            .bind(input.kanji_char_id)
            .bind(&input.image_url)
            .bind(&input.mapping_url)
            .bind(&input.explanation)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TempCreation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM kanji_go.temp_creations WHERE temp_id = $1");
        sqlx::query_as::<_, TempCreation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Drafts for a kanji, newest first.
    pub async fn list_for_kanji(
        pool: &PgPool,
        kanji_char_id: DbId,
    ) -> Result<Vec<TempCreation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM kanji_go.temp_creations
             WHERE kanji_char_id = $1
             ORDER BY created_at DESC, temp_id DESC"
        );
        sqlx::query_as::<_, TempCreation>(&query)
            .bind(kanji_char_id)
            .fetch_all(pool)
            .await
    }

    /// Discard a draft. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM kanji_go.temp_creations WHERE temp_id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
