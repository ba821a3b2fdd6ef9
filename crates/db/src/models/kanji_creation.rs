//! User-authored kanji explanations.

use kanji_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from `kanji_go.kanji_creations`.
///
/// `image_url` / `mapping_url` point at stored objects but do not own them.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct KanjiCreation {
    pub kanji_creation_id: DbId,
    pub kanji_char_id: DbId,
    pub created_by: String,
    pub created_date: Timestamp,
    pub image_url: Option<String>,
    pub mapping_url: Option<String>,
    pub explanation: String,
    pub is_public: bool,
    pub stars: i32,
    pub flags: i32,
    pub updated_at: Timestamp,
}

/// DTO for creating a kanji creation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateKanjiCreation {
    pub kanji_char_id: DbId,
    pub created_by: String,
    pub image_url: Option<String>,
    pub mapping_url: Option<String>,
    pub explanation: String,
    /// Defaults to `false` if omitted.
    pub is_public: Option<bool>,
}
