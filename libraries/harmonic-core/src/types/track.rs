/// Track domain types
use crate::types::TrackId;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Cover reference used when a track carries no artwork
pub const PLACEHOLDER_COVER: &str = "covers/placeholder.jpg";

/// Artist sentinel for files without an artist tag
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Album sentinel for files without an album tag
pub const UNKNOWN_ALBUM: &str = "Unknown Album";

/// Audio track
///
/// Immutable after creation. This is also the persisted record shape:
/// `{id, title, artist, album, cover, file, duration_seconds}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name
    pub album: String,

    /// Cover image reference (path, URL or `data:` URI)
    pub cover: Option<String>,

    /// Reference resolvable by the output device
    pub file: PathBuf,

    /// Duration in seconds, unknown until metadata resolves
    pub duration_seconds: Option<f64>,
}

impl Track {
    /// Cover reference, falling back to the placeholder image
    pub fn cover_or_placeholder(&self) -> &str {
        self.cover.as_deref().unwrap_or(PLACEHOLDER_COVER)
    }

    /// Get the track duration as a Duration
    pub fn duration(&self) -> Option<Duration> {
        self.duration_seconds
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }
}

/// Raw track record produced by metadata extraction
///
/// Same fields as [`Track`], but the identifier may still be missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTrack {
    /// Identifier, assigned on insertion when absent
    pub id: Option<TrackId>,
    /// Track title
    pub title: String,
    /// Artist name
    pub artist: String,
    /// Album name
    pub album: String,
    /// Cover image reference
    pub cover: Option<String>,
    /// Audio file
    pub file: PathBuf,
    /// Duration in seconds, if known
    pub duration_seconds: Option<f64>,
}

impl CreateTrack {
    /// Best-effort record derived from the file name alone
    ///
    /// Title is the file name with its extension stripped; artist and album
    /// use the "Unknown" sentinels and the cover is the placeholder.
    pub fn from_file_name(file: PathBuf) -> Self {
        Self {
            id: None,
            title: title_from_path(&file),
            artist: UNKNOWN_ARTIST.to_string(),
            album: UNKNOWN_ALBUM.to_string(),
            cover: Some(PLACEHOLDER_COVER.to_string()),
            file,
            duration_seconds: None,
        }
    }

    /// Convert into a [`Track`], generating an identifier if absent
    pub fn into_track(self) -> Track {
        Track {
            id: self.id.unwrap_or_else(TrackId::generate),
            title: self.title,
            artist: self.artist,
            album: self.album,
            cover: self.cover,
            file: self.file,
            duration_seconds: self.duration_seconds,
        }
    }
}

impl From<Track> for CreateTrack {
    fn from(track: Track) -> Self {
        Self {
            id: Some(track.id),
            title: track.title,
            artist: track.artist,
            album: track.album,
            cover: track.cover,
            file: track.file,
            duration_seconds: track.duration_seconds,
        }
    }
}

/// File name with the extension stripped
pub fn title_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| "Unknown".to_string())
}
