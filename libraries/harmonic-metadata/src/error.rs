/// Metadata-specific errors
use thiserror::Error;

/// Result type alias using `MetadataError`
pub type Result<T> = std::result::Result<T, MetadataError>;

/// Metadata error types
///
/// Never leaves [`crate::LoftyExtractor`]; every variant degrades to the
/// file-name fallback record.
#[derive(Error, Debug)]
pub enum MetadataError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Embedded artwork exceeds the size limit
    #[error("Artwork too large: {0} bytes (max {1})")]
    ArtworkTooLarge(usize, usize),

    /// Blocking task was cancelled or panicked
    #[error("Extraction task failed: {0}")]
    Task(String),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Lofty error
    #[error(transparent)]
    Lofty(#[from] lofty::error::LoftyError),
}

impl From<MetadataError> for harmonic_core::CoreError {
    fn from(err: MetadataError) -> Self {
        harmonic_core::CoreError::metadata(err.to_string())
    }
}
