/// Collaborator traits consumed by the playback controller
use crate::error::Result;
use crate::types::{CreateTrack, Track, TrackId};
use async_trait::async_trait;
use std::path::Path;

/// Durable key-value store of track records
///
/// Implementers persist the flat library. Records are keyed by `id` and
/// `get_all` returns them in insertion order.
#[async_trait]
pub trait TrackStore: Send + Sync {
    /// Get every stored track, in insertion order
    async fn get_all(&self) -> Result<Vec<Track>>;

    /// Insert or replace a track by id
    ///
    /// Replacing an existing record keeps its original position.
    async fn put(&self, track: &Track) -> Result<()>;

    /// Delete a track by id (deleting a missing id is not an error)
    async fn delete(&self, id: &TrackId) -> Result<()>;

    /// Remove every track
    async fn clear(&self) -> Result<()>;
}

/// Metadata extractor trait
///
/// Turns a raw audio file into a track record. Extraction never fails
/// outward: implementers degrade to a best-effort record built from the
/// file name (see [`CreateTrack::from_file_name`]).
#[async_trait]
pub trait MetadataExtractor: Send + Sync {
    /// Read the track record for an audio file
    async fn extract(&self, path: &Path) -> CreateTrack;
}
