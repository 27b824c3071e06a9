//! Error types for playback management

use harmonic_core::CoreError;
use thiserror::Error;

/// Failures reported by an output device
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
    /// The platform refused to start audio (e.g. no user gesture yet)
    #[error("Playback blocked by platform policy")]
    BlockedByPolicy,

    /// The file could not be opened or decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// The output device is gone or could not be opened
    #[error("Output device unavailable: {0}")]
    Unavailable(String),

    /// Operation needs a loaded track
    #[error("No track loaded")]
    NoTrackLoaded,
}

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Track store failure
    #[error("Track store error: {0}")]
    Store(#[from] CoreError),

    /// Output device failure
    #[error("Device error: {0}")]
    Device(#[from] DeviceError),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
