//! Shared test doubles for controller tests

#![allow(dead_code)]

use async_trait::async_trait;
use harmonic_core::{CoreError, Track, TrackId, TrackStore};
use harmonic_playback::{
    DeviceError, Notice, OutputDevice, PlaybackConfig, PlaybackController, PlaybackSnapshot,
    Subscription,
};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ===== Fake Device =====

/// Observable state of a [`FakeDevice`]
#[derive(Debug, Default)]
pub struct FakeState {
    pub loaded: Option<Track>,
    pub paused: bool,
    pub position: Duration,
    pub duration: Option<Duration>,
    pub volume: f32,
    pub loads: usize,
    pub play_calls: usize,
    pub fail_next_play: Option<DeviceError>,
    pub fail_load: Option<DeviceError>,
}

/// Scripted output device; clones share state so tests can inspect it
/// after handing a box to the controller
#[derive(Clone, Default)]
pub struct FakeDevice {
    state: Arc<Mutex<FakeState>>,
}

impl FakeDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_position(&self, seconds: f64) {
        self.state.lock().unwrap().position = Duration::from_secs_f64(seconds);
    }

    pub fn fail_next_play(&self, err: DeviceError) {
        self.state.lock().unwrap().fail_next_play = Some(err);
    }

    pub fn fail_loads(&self, err: DeviceError) {
        self.state.lock().unwrap().fail_load = Some(err);
    }

    pub fn loads(&self) -> usize {
        self.state.lock().unwrap().loads
    }

    pub fn play_calls(&self) -> usize {
        self.state.lock().unwrap().play_calls
    }

    pub fn output_volume(&self) -> f32 {
        self.state.lock().unwrap().volume
    }

    pub fn loaded_id(&self) -> Option<TrackId> {
        self.state
            .lock()
            .unwrap()
            .loaded
            .as_ref()
            .map(|track| track.id.clone())
    }

    pub fn paused(&self) -> bool {
        self.state.lock().unwrap().paused
    }

    pub fn position_secs(&self) -> f64 {
        self.state.lock().unwrap().position.as_secs_f64()
    }
}

impl OutputDevice for FakeDevice {
    fn load(&mut self, track: &Track) -> Result<(), DeviceError> {
        let mut state = self.state.lock().unwrap();
        if let Some(err) = state.fail_load.clone() {
            return Err(err);
        }

        state.loaded = Some(track.clone());
        state.paused = true;
        state.position = Duration::ZERO;
        state.duration = track.duration();
        state.loads += 1;
        Ok(())
    }

    fn play(&mut self) -> Result<(), DeviceError> {
        let mut state = self.state.lock().unwrap();
        if state.loaded.is_none() {
            return Err(DeviceError::NoTrackLoaded);
        }
        if let Some(err) = state.fail_next_play.take() {
            return Err(err);
        }

        state.paused = false;
        state.play_calls += 1;
        Ok(())
    }

    fn pause(&mut self) {
        let mut state = self.state.lock().unwrap();
        if state.loaded.is_some() {
            state.paused = true;
        }
    }

    fn stop(&mut self) {
        let mut state = self.state.lock().unwrap();
        state.loaded = None;
        state.paused = true;
        state.position = Duration::ZERO;
        state.duration = None;
    }

    fn seek(&mut self, position: Duration) -> Result<(), DeviceError> {
        let mut state = self.state.lock().unwrap();
        if state.loaded.is_none() {
            return Err(DeviceError::NoTrackLoaded);
        }

        state.position = match state.duration {
            Some(duration) => position.min(duration),
            None => position,
        };
        Ok(())
    }

    fn position(&self) -> Duration {
        self.state.lock().unwrap().position
    }

    fn duration(&self) -> Option<Duration> {
        self.state.lock().unwrap().duration
    }

    fn is_paused(&self) -> bool {
        let state = self.state.lock().unwrap();
        state.loaded.is_none() || state.paused
    }

    fn is_loaded(&self) -> bool {
        self.state.lock().unwrap().loaded.is_some()
    }

    fn set_volume(&mut self, volume: f32) {
        self.state.lock().unwrap().volume = volume;
    }
}

// ===== Memory Store =====

/// In-memory track store with failure injection
#[derive(Default)]
pub struct MemoryStore {
    tracks: Mutex<Vec<Track>>,
    pub fail_get_all: AtomicBool,
    pub fail_put: AtomicBool,
    pub fail_delete: AtomicBool,
}

impl MemoryStore {
    pub fn with_tracks(tracks: Vec<Track>) -> Self {
        Self {
            tracks: Mutex::new(tracks),
            ..Self::default()
        }
    }

    pub fn ids(&self) -> Vec<String> {
        self.tracks
            .lock()
            .unwrap()
            .iter()
            .map(|track| track.id.to_string())
            .collect()
    }

    fn check(flag: &AtomicBool, operation: &str) -> harmonic_core::Result<()> {
        if flag.load(Ordering::SeqCst) {
            Err(CoreError::storage(format!("{operation} failed")))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl TrackStore for MemoryStore {
    async fn get_all(&self) -> harmonic_core::Result<Vec<Track>> {
        Self::check(&self.fail_get_all, "get_all")?;
        Ok(self.tracks.lock().unwrap().clone())
    }

    async fn put(&self, track: &Track) -> harmonic_core::Result<()> {
        Self::check(&self.fail_put, "put")?;
        let mut tracks = self.tracks.lock().unwrap();
        match tracks.iter_mut().find(|existing| existing.id == track.id) {
            Some(existing) => *existing = track.clone(),
            None => tracks.push(track.clone()),
        }
        Ok(())
    }

    async fn delete(&self, id: &TrackId) -> harmonic_core::Result<()> {
        Self::check(&self.fail_delete, "delete")?;
        self.tracks.lock().unwrap().retain(|track| &track.id != id);
        Ok(())
    }

    async fn clear(&self) -> harmonic_core::Result<()> {
        self.tracks.lock().unwrap().clear();
        Ok(())
    }
}

// ===== Builders =====

pub fn create_test_track(id: &str, duration_secs: f64) -> Track {
    Track {
        id: TrackId::new(id),
        title: format!("Track {id}"),
        artist: "Test Artist".to_string(),
        album: "Test Album".to_string(),
        cover: None,
        file: PathBuf::from(format!("/music/{id}.mp3")),
        duration_seconds: Some(duration_secs),
    }
}

/// Controller over a fake device with `ids` already loaded from the store
pub async fn controller_with(
    ids: &[&str],
    config: PlaybackConfig,
) -> (PlaybackController, FakeDevice, Arc<MemoryStore>) {
    let tracks = ids.iter().map(|id| create_test_track(id, 180.0)).collect();
    let store = Arc::new(MemoryStore::with_tracks(tracks));
    let device = FakeDevice::new();

    let mut controller =
        PlaybackController::new(config, Box::new(device.clone()), store.clone());
    controller.load_library().await;

    (controller, device, store)
}

/// Collect every snapshot published after subscription
pub fn record_snapshots(
    controller: &PlaybackController,
) -> (Subscription, Arc<Mutex<Vec<PlaybackSnapshot>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let subscription = controller.subscribe(move |snapshot| {
        sink.lock().unwrap().push(snapshot.clone());
    });
    (subscription, seen)
}

/// Collect every notice raised after subscription
pub fn record_notices(controller: &PlaybackController) -> (Subscription, Arc<Mutex<Vec<Notice>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let subscription = controller.subscribe_notices(move |notice| {
        sink.lock().unwrap().push(notice.clone());
    });
    (subscription, seen)
}
