//! Errors for multi-step writes where the failing step matters to callers.

/// Failure of a single-row insert wrapped in a transaction.
///
/// The transaction is rolled back (dropped uncommitted) for every variant
/// except `Commit`, where the outcome is whatever the server decided.
#[derive(Debug, thiserror::Error)]
pub enum TxError {
    #[error("failed to begin transaction: {0}")]
    Begin(#[source] sqlx::Error),

    #[error("failed to insert {entity}: {source}")]
    Insert {
        entity: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("failed to commit transaction: {0}")]
    Commit(#[source] sqlx::Error),
}
