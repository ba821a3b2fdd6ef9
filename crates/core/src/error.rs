use crate::types::DbId;

/// Domain failures shared by the storage, database and HTTP layers.
///
/// The HTTP layer owns the status mapping; the `Display` text here is what
/// ends up in logs.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A row looked up by primary key does not exist.
    #[error("{entity} {id} does not exist")]
    NotFound { entity: &'static str, id: DbId },

    /// User input was rejected; the message is shown to the user as-is.
    #[error("invalid input: {0}")]
    Validation(String),

    /// A state-changing request failed the CSRF check.
    #[error("request rejected: {0}")]
    Forbidden(String),

    #[error("{0}")]
    Internal(String),
}
