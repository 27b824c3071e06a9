//! User-visible notices
//!
//! Non-fatal failures the controller surfaces to the front-end. The
//! controller stays usable after every one of them.

use harmonic_core::TrackId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-fatal notification raised by the controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Notice {
    /// The device refused to start playback (e.g. autoplay policy)
    PlaybackBlocked {
        /// Track that was loaded
        track_id: TrackId,
        /// Reason reported by the device
        reason: String,
    },

    /// The device could not load or decode a track
    LoadFailed {
        /// Track under the cursor, if any
        track_id: Option<TrackId>,
        /// Reason reported by the device
        reason: String,
    },

    /// A track store operation failed
    StorageFailed {
        /// Store operation (`get_all`, `put`, `delete`, `clear`)
        operation: String,
        /// Error message
        reason: String,
    },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::PlaybackBlocked { reason, .. } => {
                write!(f, "Playback could not start: {}", reason)
            }
            Notice::LoadFailed { reason, .. } => write!(f, "Could not load track: {}", reason),
            Notice::StorageFailed { operation, reason } => {
                write!(f, "Library {} failed: {}", operation, reason)
            }
        }
    }
}
