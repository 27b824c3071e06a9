//! Track record extraction with file-name fallbacks

use crate::error::MetadataError;
use crate::reader::{read_tags, TagData};
use async_trait::async_trait;
use harmonic_core::types::{title_from_path, PLACEHOLDER_COVER, UNKNOWN_ALBUM, UNKNOWN_ARTIST};
use harmonic_core::{CreateTrack, MetadataExtractor};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Metadata extractor using the lofty library
///
/// Tag parsing runs on the blocking pool. Any failure, including an
/// unreadable file, degrades to a record built from the file name.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoftyExtractor;

impl LoftyExtractor {
    /// Create a new extractor
    pub fn new() -> Self {
        Self
    }

    /// Synchronous extraction, for callers already off the async runtime
    pub fn extract_blocking(path: &Path) -> CreateTrack {
        match read_tags(path) {
            Ok(tags) => record_from_tags(path.to_path_buf(), tags),
            Err(err) => {
                warn!("Falling back to file name for {}: {}", path.display(), err);
                CreateTrack::from_file_name(path.to_path_buf())
            }
        }
    }
}

#[async_trait]
impl MetadataExtractor for LoftyExtractor {
    async fn extract(&self, path: &Path) -> CreateTrack {
        let owned = path.to_path_buf();
        let result = tokio::task::spawn_blocking(move || Self::extract_blocking(&owned)).await;

        match result {
            Ok(record) => record,
            Err(err) => {
                let err = MetadataError::Task(err.to_string());
                warn!("Falling back to file name for {}: {}", path.display(), err);
                CreateTrack::from_file_name(path.to_path_buf())
            }
        }
    }
}

/// Fill gaps in the tags with the file-name fallbacks
fn record_from_tags(file: PathBuf, tags: TagData) -> CreateTrack {
    debug!(
        "Read tags from {} (title: {}, artist: {})",
        file.display(),
        tags.title.is_some(),
        tags.artist.is_some()
    );

    CreateTrack {
        id: None,
        title: tags.title.unwrap_or_else(|| title_from_path(&file)),
        artist: tags.artist.unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
        album: tags.album.unwrap_or_else(|| UNKNOWN_ALBUM.to_string()),
        cover: Some(tags.cover.unwrap_or_else(|| PLACEHOLDER_COVER.to_string())),
        duration_seconds: tags.duration_seconds,
        file,
    }
}
