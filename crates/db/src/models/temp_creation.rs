//! Draft kanji creations.

use kanji_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from `kanji_go.temp_creations`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TempCreation {
    pub temp_id: DbId,
    pub kanji_char_id: DbId,
    pub image_url: Option<String>,
    pub mapping_url: Option<String>,
    pub explanation: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTempCreation {
    pub kanji_char_id: DbId,
    pub image_url: Option<String>,
    pub mapping_url: Option<String>,
    pub explanation: String,
}
