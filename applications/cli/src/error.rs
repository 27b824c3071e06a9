/// CLI error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid command: {0}")]
    Command(String),

    #[error("No track with id {0}")]
    UnknownTrack(String),

    #[error("Storage error: {0}")]
    Storage(#[from] harmonic_storage::StorageError),

    #[error("Library error: {0}")]
    Library(#[from] harmonic_playback::PlaybackError),

    #[error("Import error: {0}")]
    Import(#[from] harmonic_importer::ImportError),

    #[error("Audio error: {0}")]
    Audio(#[from] harmonic_audio_desktop::AudioError),

    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}
