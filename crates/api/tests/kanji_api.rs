//! Integration tests for the kanji listing and insert endpoints.

mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::http::StatusCode;
use axum::Router;
use common::{
    body_string, build_app_with, build_test_app, get, post_form, test_config_with,
    unreachable_pool, TEST_BUCKET,
};
use kanji_cloud::memory::MemoryObjectStore;
use kanji_core::environment::AppEnv;
use kanji_core::jlpt::JlptLevel;
use kanji_db::models::kanji::CreateKanji;
use kanji_db::repositories::KanjiRepo;
use sqlx::PgPool;

fn new_kanji(glyph: &str, level: JlptLevel) -> CreateKanji {
    CreateKanji {
        kanji_char: glyph.to_string(),
        romaji_onyomi: "on".into(),
        romaji_kunyomi: "kun".into(),
        hiragana_onyomi: "おん".into(),
        hiragana_kunyomi: "くん".into(),
        jlpt_level: level,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_table_renders_empty_state(pool: PgPool) {
    let (app, _store) = build_test_app(pool, AppEnv::Local);

    let response = get(app, "/api/kanji").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response)
        .await
        .contains("No kanji found in the database."));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn listing_is_ordered_by_id(pool: PgPool) {
    for (glyph, level) in [("山", JlptLevel::N5), ("川", JlptLevel::N4), ("森", JlptLevel::N3)] {
        KanjiRepo::create(&pool, &new_kanji(glyph, level)).await.unwrap();
    }
    let (app, _store) = build_test_app(pool, AppEnv::Local);

    let html = body_string(get(app, "/api/kanji").await).await;
    let positions: Vec<usize> = ["山", "川", "森"]
        .iter()
        .map(|glyph| html.find(glyph).expect("glyph rendered"))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
    assert!(html.contains("JLPT Level:</strong> N4"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn listing_escapes_stored_markup(pool: PgPool) {
    KanjiRepo::create(&pool, &new_kanji("<script>", JlptLevel::N1))
        .await
        .unwrap();
    let (app, _store) = build_test_app(pool, AppEnv::Local);

    let html = body_string(get(app, "/api/kanji").await).await;
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn post_creates_kanji_and_returns_card(pool: PgPool) {
    let (app, _store) = build_test_app(pool.clone(), AppEnv::Local);

    let form = "kanji_char=%E6%B0%B4&romaji_onyomi=sui&romaji_kunyomi=mizu\
                &hiragana_onyomi=%E3%81%99%E3%81%84&hiragana_kunyomi=%E3%81%BF%E3%81%9A\
                &jlpt_level=N5";
    let response = post_form(app, "/api/kanji", form).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let html = body_string(response).await;
    assert!(html.contains(">水<"));
    assert!(html.contains("すい (sui)"));

    assert_eq!(KanjiRepo::count(&pool).await.unwrap(), 1);
    let stored = KanjiRepo::list_all(&pool).await.unwrap();
    assert_eq!(stored[0].jlpt_level, JlptLevel::N5);
    assert!(html.contains(&format!("kanji-{}", stored[0].kanji_char_id)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn post_with_invalid_level_is_rejected(pool: PgPool) {
    let (app, _store) = build_test_app(pool.clone(), AppEnv::Local);

    let response = post_form(app, "/api/kanji", "kanji_char=%E6%B0%B4&jlpt_level=n9").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_string(response).await.contains("Invalid JLPT level"));
    assert_eq!(KanjiRepo::count(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn post_without_character_is_rejected(pool: PgPool) {
    let (app, _store) = build_test_app(pool.clone(), AppEnv::Local);

    let response = post_form(app, "/api/kanji", "jlpt_level=n5").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(KanjiRepo::count(&pool).await.unwrap(), 0);
}

/// Router whose database never answers, with a one-second query bound.
fn unreachable_db_app() -> Router {
    let config = test_config_with(AppEnv::Local, &[("DB_TIMEOUT_SECS", "1")]);
    build_app_with(
        unreachable_pool(),
        config,
        Arc::new(MemoryObjectStore::new(TEST_BUCKET)),
    )
}

#[tokio::test]
async fn listing_with_unreachable_db_is_prompt_500() {
    let started = Instant::now();
    let response = get(unreachable_db_app(), "/api/kanji").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_string(response).await, "Internal Server Error");
    assert!(started.elapsed() < Duration::from_secs(15), "{:?}", started.elapsed());
}

#[tokio::test]
async fn insert_with_unreachable_db_is_500() {
    let response = post_form(
        unreachable_db_app(),
        "/api/kanji",
        "kanji_char=%E6%B0%B4&jlpt_level=n5",
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_string(response).await, "Internal Server Error");
}
