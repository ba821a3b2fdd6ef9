//! Repository for the `kanji_go.kanji` table.

use futures::TryStreamExt;
use kanji_core::types::DbId;
use sqlx::{FromRow, PgPool};

use crate::error::TxError;
use crate::models::kanji::{CreateKanji, Kanji};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "kanji_char_id, kanji_char, romaji_onyomi, romaji_kunyomi, \
                       hiragana_onyomi, hiragana_kunyomi, jlpt_level, created_at, updated_at";

/// Provides insert and read operations for kanji.
pub struct KanjiRepo;

impl KanjiRepo {
    /// Insert a kanji inside a transaction, returning the stored row with its
    /// database-assigned id and timestamps.
    ///
    /// Any insert failure rolls the transaction back. Uniqueness is left to
    /// the schema.
    pub async fn create(pool: &PgPool, input: &CreateKanji) -> Result<Kanji, TxError> {
        let mut tx = pool.begin().await.map_err(TxError::Begin)?;

        let query = format!(
            "INSERT INTO kanji_go.kanji
                (kanji_char, romaji_onyomi, romaji_kunyomi, hiragana_onyomi, hiragana_kunyomi, jlpt_level)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let kanji = sqlx::query_as::<_, Kanji>(&query)
            .bind(&input.kanji_char)
            .bind(&input.romaji_onyomi)
            .bind(&input.romaji_kunyomi)
            .bind(&input.hiragana_onyomi)
            .bind(&input.hiragana_kunyomi)
            .bind(input.jlpt_level.as_str())
            .fetch_one(&mut *tx)
            .await
            .map_err(|source| TxError::Insert {
                entity: "kanji",
                source,
            })?;

        tx.commit().await.map_err(TxError::Commit)?;
        Ok(kanji)
    }

    /// List every kanji ordered by id ascending.
    ///
    /// Rows that fail to decode are logged and skipped rather than failing
    /// the whole listing.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Kanji>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM kanji_go.kanji ORDER BY kanji_char_id");
        let mut rows = sqlx::query(&query).fetch(pool);

        let mut kanji = Vec::new();
        while let Some(row) = rows.try_next().await? {
            match Kanji::from_row(&row) {
                Ok(k) => kanji.push(k),
                Err(e) => tracing::warn!(error = %e, "Skipping undecodable kanji row"),
            }
        }
        Ok(kanji)
    }

    /// Find a kanji by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Kanji>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM kanji_go.kanji WHERE kanji_char_id = $1");
        sqlx::query_as::<_, Kanji>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Total number of kanji rows.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM kanji_go.kanji")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
