//! Kanji listing and insertion.

use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::Form;
use kanji_core::error::CoreError;
use kanji_core::jlpt::JlptLevel;
use kanji_db::models::kanji::CreateKanji;
use kanji_db::repositories::KanjiRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::handlers::with_db_timeout;
use crate::state::AppState;
use crate::views::kanji::{kanji_card, kanji_list};

/// Urlencoded body of `POST /api/kanji`.
#[derive(Debug, Deserialize)]
pub struct KanjiForm {
    #[serde(default)]
    pub kanji_char: String,
    #[serde(default)]
    pub romaji_onyomi: String,
    #[serde(default)]
    pub romaji_kunyomi: String,
    #[serde(default)]
    pub hiragana_onyomi: String,
    #[serde(default)]
    pub hiragana_kunyomi: String,
    #[serde(default)]
    pub jlpt_level: String,
}

impl KanjiForm {
    fn validate(self) -> Result<CreateKanji, CoreError> {
        let kanji_char = self.kanji_char.trim().to_string();
        if kanji_char.is_empty() {
            return Err(CoreError::Validation("kanji_char is required".into()));
        }
        let jlpt_level: JlptLevel = self.jlpt_level.parse()?;

        Ok(CreateKanji {
            kanji_char,
            romaji_onyomi: self.romaji_onyomi.trim().to_string(),
            romaji_kunyomi: self.romaji_kunyomi.trim().to_string(),
            hiragana_onyomi: self.hiragana_onyomi.trim().to_string(),
            hiragana_kunyomi: self.hiragana_kunyomi.trim().to_string(),
            jlpt_level,
        })
    }
}

fn db_timeout(state: &AppState) -> Duration {
    Duration::from_secs(state.config.db_timeout_secs)
}

/// GET /api/kanji
///
/// Every kanji ordered by id, as a card grid.
pub async fn list_kanji(State(state): State<AppState>) -> AppResult<Html<String>> {
    let kanji = with_db_timeout(
        db_timeout(&state),
        "list kanji",
        KanjiRepo::list_all(&state.pool),
    )
    .await?;
    tracing::debug!(count = kanji.len(), "Listed kanji");
    Ok(Html(kanji_list(&kanji)))
}

/// POST /api/kanji
///
/// Insert one kanji and return its card.
pub async fn create_kanji(
    State(state): State<AppState>,
    Form(form): Form<KanjiForm>,
) -> AppResult<impl IntoResponse> {
    let input = form.validate()?;
    let kanji = with_db_timeout(
        db_timeout(&state),
        "insert kanji",
        KanjiRepo::create(&state.pool, &input),
    )
    .await?;

    tracing::info!(kanji_id = kanji.kanji_char_id, kanji = %kanji.kanji_char, "Kanji created");

    Ok((StatusCode::CREATED, Html(kanji_card(&kanji))))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn form(kanji_char: &str, jlpt_level: &str) -> KanjiForm {
        KanjiForm {
            kanji_char: kanji_char.into(),
            romaji_onyomi: " sui ".into(),
            romaji_kunyomi: "mizu".into(),
            hiragana_onyomi: "すい".into(),
            hiragana_kunyomi: "みず".into(),
            jlpt_level: jlpt_level.into(),
        }
    }

    #[test]
    fn valid_form_is_trimmed_and_parsed() {
        let input = form(" 水 ", "N5").validate().unwrap();
        assert_eq!(input.kanji_char, "水");
        assert_eq!(input.romaji_onyomi, "sui");
        assert_eq!(input.jlpt_level, JlptLevel::N5);
    }

    #[test]
    fn blank_character_is_rejected() {
        assert_matches!(form("  ", "n5").validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn unknown_level_is_rejected() {
        assert_matches!(form("水", "n6").validate(), Err(CoreError::Validation(_)));
    }
}
