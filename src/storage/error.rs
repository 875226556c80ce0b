use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure reported by a record store backend.
///
/// The display text is the backend's own message; it is sent to clients as-is.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Backend(String),
}
