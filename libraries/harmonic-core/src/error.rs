/// Core error types for Harmonic
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Harmonic
#[derive(Error, Debug)]
pub enum CoreError {
    /// Track store read/write failures
    #[error("Storage error: {0}")]
    Storage(String),

    /// Metadata parsing errors
    #[error("Metadata error: {0}")]
    Metadata(String),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a metadata error
    pub fn metadata(msg: impl Into<String>) -> Self {
        Self::Metadata(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Whether this error came from the track store
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for CoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::Storage(err.to_string())
    }
}
