//! Core types for playback management

use crate::error::DeviceError;
use harmonic_core::Track;
use serde::{Deserialize, Serialize};

/// Read-only projection of controller state published to observers
///
/// Recomputed from the cursor and the device every time it is requested;
/// never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    /// Track under the cursor
    pub current_track: Option<Track>,

    /// Cursor value
    pub index: Option<usize>,

    /// Whether the device is audibly playing
    pub is_playing: bool,

    /// Playback position in seconds
    pub position_seconds: f64,

    /// Duration of the current track in seconds (0 when unknown)
    pub duration_seconds: f64,

    /// Wrap to the first track after the last
    pub loop_enabled: bool,

    /// Random next-track selection
    pub shuffle: bool,

    /// Nominal volume (0.0-1.0)
    pub volume: f32,

    /// Whether output is muted
    pub muted: bool,
}

/// Outcome of an operation that may start playback
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayStatus {
    /// The device accepted the start request
    Started,

    /// The track is loaded (or the start was requested) but it is not audible
    Failed(DeviceError),

    /// A toggle paused playback instead of starting it
    Paused,

    /// End of queue with loop off; the last track stays loaded and paused
    EndOfQueue,

    /// Invalid argument or nothing to act on; state unchanged
    Ignored,
}

impl PlayStatus {
    /// Whether audio was started
    pub fn is_started(&self) -> bool {
        matches!(self, Self::Started)
    }
}

/// Configuration for the playback controller
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Initial nominal volume (0.0-1.0, default: 1.0)
    pub volume: f32,

    /// `previous` restarts the current track past this position (default: 3.0)
    pub restart_threshold_secs: f64,

    /// Initial loop flag (default: false)
    pub loop_enabled: bool,

    /// Initial shuffle flag (default: false)
    pub shuffle: bool,

    /// Seed for shuffle selection; random when unset
    pub shuffle_seed: Option<u64>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: 1.0,
            restart_threshold_secs: 3.0,
            loop_enabled: false,
            shuffle: false,
            shuffle_seed: None,
        }
    }
}
