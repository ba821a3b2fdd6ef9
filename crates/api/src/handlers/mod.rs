pub mod files;
pub mod kanji;
pub mod pages;

use std::future::Future;
use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Bound a database call by `limit`; expiry becomes [`AppError::DatabaseTimeout`].
pub(crate) async fn with_db_timeout<T, E, F>(
    limit: Duration,
    operation: &'static str,
    fut: F,
) -> AppResult<T>
where
    F: Future<Output = Result<T, E>>,
    E: Into<AppError>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result.map_err(Into::into),
        Err(_) => Err(AppError::DatabaseTimeout {
            operation,
            secs: limit.as_secs(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn db_call_past_the_limit_times_out() {
        let result: AppResult<()> = with_db_timeout(Duration::from_secs(30), "list", async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok::<_, sqlx::Error>(())
        })
        .await;
        assert_matches!(
            result,
            Err(AppError::DatabaseTimeout {
                operation: "list",
                secs: 30
            })
        );
    }

    #[tokio::test]
    async fn db_errors_pass_through() {
        let result: AppResult<()> = with_db_timeout(Duration::from_secs(30), "list", async {
            Err(sqlx::Error::PoolTimedOut)
        })
        .await;
        assert_matches!(result, Err(AppError::Database(sqlx::Error::PoolTimedOut)));
    }
}
