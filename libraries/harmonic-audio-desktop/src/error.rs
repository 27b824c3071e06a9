/// Desktop audio errors
use harmonic_playback::DeviceError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `AudioError`
pub type Result<T> = std::result::Result<T, AudioError>;

#[derive(Debug, Error)]
pub enum AudioError {
    /// No usable output device
    #[error("Failed to open output stream: {0}")]
    Stream(String),

    /// File could not be opened
    #[error("Failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File could not be decoded
    #[error("Failed to decode {}: {reason}", .path.display())]
    Decode { path: PathBuf, reason: String },

    /// Seek rejected by the decoder
    #[error("Seek failed: {0}")]
    Seek(String),

    /// Watcher thread could not be started
    #[error("Failed to spawn watcher thread: {0}")]
    Thread(#[from] std::io::Error),
}

impl From<AudioError> for DeviceError {
    fn from(err: AudioError) -> Self {
        match err {
            AudioError::Stream(msg) => DeviceError::Unavailable(msg),
            AudioError::Thread(err) => DeviceError::Unavailable(err.to_string()),
            other => DeviceError::Decode(other.to_string()),
        }
    }
}
