//! Round-trips a small text object through the configured bucket:
//! write, list, read back, compare, delete.

use std::time::Duration;

use anyhow::{ensure, Context};
use axum::body::Bytes;
use kanji_api::config::StorageConfig;
use kanji_api::state::connect_object_store;
use kanji_cloud::with_timeout;

const TEST_CONTENT: &str = "Hello from the bucket test script!";
const STEP_TIMEOUT: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    kanji_api::init_tracing("bucket_check=info,kanji_cloud=info");

    let config = StorageConfig::from_lookup(|key| std::env::var(key).ok())
        .context("invalid storage configuration")?;
    let store = connect_object_store(&config).await;
    println!("Using bucket: {}", store.bucket());

    let key = format!("test-file-{}.txt", chrono::Utc::now().timestamp());
    let written = with_timeout(
        STEP_TIMEOUT,
        "upload",
        store.put_object(&key, Bytes::from_static(TEST_CONTENT.as_bytes()), "text/plain"),
    )
    .await
    .context("failed to write test file")?;
    println!("Uploaded {key} ({written} bytes)");

    let objects = with_timeout(STEP_TIMEOUT, "list", store.list_objects(""))
        .await
        .context("failed to list bucket")?;
    for (i, object) in objects.iter().enumerate() {
        println!(
            "{}. {} (size: {} bytes, created: {})",
            i + 1,
            object.name,
            object.size,
            object.created.format("%Y-%m-%d %H:%M:%S"),
        );
    }
    ensure!(
        objects.iter().any(|object| object.name == key),
        "test file {key} missing from listing"
    );

    let object = with_timeout(STEP_TIMEOUT, "read", store.get_object(&key))
        .await
        .context("failed to read test file")?;
    ensure!(
        object.body.as_ref() == TEST_CONTENT.as_bytes(),
        "content mismatch: got {:?}",
        String::from_utf8_lossy(&object.body)
    );
    println!("Read back matching content");

    with_timeout(STEP_TIMEOUT, "delete", store.delete_object(&key))
        .await
        .context("failed to delete test file")?;
    println!("Deleted {key}; bucket check passed");

    Ok(())
}
