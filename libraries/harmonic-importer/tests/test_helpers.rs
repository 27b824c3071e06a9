#![allow(dead_code)]

use async_trait::async_trait;
use harmonic_core::{CoreError, CreateTrack, MetadataExtractor, Track, TrackId, TrackStore};
use harmonic_playback::{NullDevice, PlaybackConfig, PlaybackController};
use harmonic_storage::SqliteTrackStore;
use std::path::Path;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

static INIT: Once = Once::new();

fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// Controller over an in-memory SQLite library
pub async fn setup_controller() -> (PlaybackController, Arc<SqliteTrackStore>) {
    init_tracing();

    let store = Arc::new(
        SqliteTrackStore::in_memory()
            .await
            .expect("Failed to create in-memory store"),
    );
    let controller = PlaybackController::new(
        PlaybackConfig::default(),
        Box::new(NullDevice::default()),
        store.clone(),
    );
    (controller, store)
}

/// Extractor whose latency shrinks for later files, so a concurrent
/// implementation would finish them out of order
pub struct SlowFirstExtractor {
    pub calls: Mutex<Vec<String>>,
}

impl SlowFirstExtractor {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl MetadataExtractor for SlowFirstExtractor {
    async fn extract(&self, path: &Path) -> CreateTrack {
        let delay = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(path.display().to_string());
            40u64.saturating_sub(calls.len() as u64 * 10)
        };
        tokio::time::sleep(Duration::from_millis(delay)).await;

        CreateTrack::from_file_name(path.to_path_buf())
    }
}

/// Store that refuses to persist files whose name contains "corrupt"
#[derive(Default)]
pub struct PickyStore {
    tracks: Mutex<Vec<Track>>,
}

#[async_trait]
impl TrackStore for PickyStore {
    async fn get_all(&self) -> harmonic_core::Result<Vec<Track>> {
        Ok(self.tracks.lock().unwrap().clone())
    }

    async fn put(&self, track: &Track) -> harmonic_core::Result<()> {
        if track.file.to_string_lossy().contains("corrupt") {
            return Err(CoreError::storage("disk refused the write"));
        }
        self.tracks.lock().unwrap().push(track.clone());
        Ok(())
    }

    async fn delete(&self, id: &TrackId) -> harmonic_core::Result<()> {
        self.tracks.lock().unwrap().retain(|track| &track.id != id);
        Ok(())
    }

    async fn clear(&self) -> harmonic_core::Result<()> {
        self.tracks.lock().unwrap().clear();
        Ok(())
    }
}

pub fn titles(controller: &PlaybackController) -> Vec<String> {
    controller
        .queue()
        .tracks()
        .iter()
        .map(|track| track.title.clone())
        .collect()
}
