/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Database connection error
    #[error("Database connection error: {0}")]
    Connection(String),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Stored row could not be mapped to a track
    #[error("Corrupt row: {0}")]
    CorruptRow(String),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl From<StorageError> for harmonic_core::CoreError {
    fn from(err: StorageError) -> Self {
        harmonic_core::CoreError::storage(err.to_string())
    }
}
