//! Kanji entity model and DTOs.

use kanji_core::jlpt::JlptLevel;
use kanji_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `kanji_go.kanji` table.
///
/// `kanji_char_id` is assigned by the database on insert and never changes.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Kanji {
    pub kanji_char_id: DbId,
    pub kanji_char: String,
    pub romaji_onyomi: String,
    pub romaji_kunyomi: String,
    pub hiragana_onyomi: String,
    pub hiragana_kunyomi: String,
    #[sqlx(try_from = "String")]
    pub jlpt_level: JlptLevel,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a kanji.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateKanji {
    pub kanji_char: String,
    pub romaji_onyomi: String,
    pub romaji_kunyomi: String,
    pub hiragana_onyomi: String,
    pub hiragana_kunyomi: String,
    pub jlpt_level: JlptLevel,
}
