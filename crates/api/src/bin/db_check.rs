//! Connects with the server's configuration and prints a sample of the
//! kanji table.

use anyhow::Context;
use kanji_api::config::ServerConfig;
use kanji_db::repositories::KanjiRepo;

const SAMPLE_SIZE: usize = 5;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    kanji_api::init_tracing("db_check=info,kanji_db=info");

    let config = ServerConfig::from_env().context("invalid configuration")?;
    tracing::info!(host = %config.db.host, database = %config.db.name, app_env = %config.app_env, "Connecting");

    let pool = kanji_db::create_pool(&config.db, config.app_env)
        .await
        .context("failed to connect to database")?;
    kanji_db::health_check(&pool)
        .await
        .context("database health check failed")?;
    println!("Connected to {}", config.db.name);

    let count = KanjiRepo::count(&pool).await.context("failed to count kanji")?;
    println!("Found {count} kanji");

    let kanji = KanjiRepo::list_all(&pool).await.context("failed to list kanji")?;
    for k in kanji.iter().take(SAMPLE_SIZE) {
        println!(
            "{:>4}  {}  {} ({})  {} ({})  {}",
            k.kanji_char_id,
            k.kanji_char,
            k.hiragana_onyomi,
            k.romaji_onyomi,
            k.hiragana_kunyomi,
            k.romaji_kunyomi,
            k.jlpt_level,
        );
    }

    pool.close().await;
    Ok(())
}
