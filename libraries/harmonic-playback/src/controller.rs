//! Playback controller - core orchestration
//!
//! Owns the queue, cursor, mode flags and the output device, and publishes a
//! fresh [`PlaybackSnapshot`] to observers after every transition.

use crate::{
    device::{DeviceEvent, DeviceEventReceiver, OutputDevice},
    error::{PlaybackError, Result},
    events::Notice,
    observers::{Registry, Subscription},
    queue::{Advance, Queue},
    shuffle::pick_index,
    types::{PlayStatus, PlaybackConfig, PlaybackSnapshot},
    volume::Volume,
};
use harmonic_core::{CoreError, CreateTrack, Track, TrackId, TrackStore};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Playback controller
///
/// Single source of truth for what is playing. Construct one per session and
/// pass it around by `&mut`; it is the only component allowed to drive the
/// output device.
pub struct PlaybackController {
    queue: Queue,
    volume: Volume,
    loop_enabled: bool,
    shuffle: bool,
    restart_threshold: Duration,
    rng: StdRng,

    device: Box<dyn OutputDevice>,
    store: Arc<dyn TrackStore>,

    observers: Registry<PlaybackSnapshot>,
    notices: Registry<Notice>,
}

impl PlaybackController {
    /// Create a new controller
    ///
    /// The queue starts empty; call [`load_library`](Self::load_library) to
    /// fill it from the store.
    pub fn new(
        config: PlaybackConfig,
        mut device: Box<dyn OutputDevice>,
        store: Arc<dyn TrackStore>,
    ) -> Self {
        let volume = Volume::new(config.volume);
        device.set_volume(volume.gain());

        let rng = match config.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let restart_threshold = Duration::try_from_secs_f64(config.restart_threshold_secs)
            .unwrap_or_else(|_| Duration::from_secs(3));

        Self {
            queue: Queue::new(),
            volume,
            loop_enabled: config.loop_enabled,
            shuffle: config.shuffle,
            restart_threshold,
            rng,
            device,
            store,
            observers: Registry::new(),
            notices: Registry::new(),
        }
    }

    // ===== Observers =====

    /// Register a snapshot observer
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&PlaybackSnapshot) + Send + Sync + 'static,
    {
        self.observers.subscribe(observer)
    }

    /// Register a notice observer
    pub fn subscribe_notices<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&Notice) + Send + Sync + 'static,
    {
        self.notices.subscribe(observer)
    }

    /// Project the current state
    pub fn snapshot(&self) -> PlaybackSnapshot {
        let current_track = self.queue.current().cloned();
        let loaded = self.device.is_loaded();

        let duration_seconds = self
            .device
            .duration()
            .or_else(|| current_track.as_ref().and_then(Track::duration))
            .map_or(0.0, |duration| duration.as_secs_f64());

        PlaybackSnapshot {
            index: self.queue.cursor(),
            is_playing: loaded && !self.device.is_paused(),
            position_seconds: self.device.position().as_secs_f64(),
            duration_seconds,
            loop_enabled: self.loop_enabled,
            shuffle: self.shuffle,
            volume: self.volume.level(),
            muted: self.volume.is_muted(),
            current_track,
        }
    }

    fn publish(&self) {
        self.observers.emit(&self.snapshot());
    }

    fn notify(&self, notice: Notice) {
        self.notices.emit(&notice);
    }

    // ===== Playback Control =====

    /// Load the track at `index` and start it
    ///
    /// Out-of-range indices are ignored and nothing is published.
    pub fn play_at_index(&mut self, index: usize) -> PlayStatus {
        if !self.queue.set_cursor(index) {
            debug!("Ignoring play_at_index({}) on queue of {}", index, self.queue.len());
            return PlayStatus::Ignored;
        }

        let status = self.start_current();
        self.publish();
        status
    }

    fn start_current(&mut self) -> PlayStatus {
        let Some(track) = self.queue.current().cloned() else {
            return PlayStatus::Ignored;
        };

        debug!("Loading track {} ({})", track.id, track.title);
        if let Err(err) = self.device.load(&track) {
            warn!("Failed to load track {}: {}", track.id, err);
            // The previous track may still be loaded; drop it so the
            // snapshot matches the cursor.
            self.device.stop();
            self.notify(Notice::LoadFailed {
                track_id: Some(track.id),
                reason: err.to_string(),
            });
            return PlayStatus::Failed(err);
        }

        self.device.set_volume(self.volume.gain());
        self.start_device(&track.id)
    }

    fn start_device(&mut self, track_id: &TrackId) -> PlayStatus {
        match self.device.play() {
            Ok(()) => PlayStatus::Started,
            Err(err) => {
                warn!("Playback of {} did not start: {}", track_id, err);
                self.notify(Notice::PlaybackBlocked {
                    track_id: track_id.clone(),
                    reason: err.to_string(),
                });
                PlayStatus::Failed(err)
            }
        }
    }

    /// Start or resume the loaded track
    pub fn play(&mut self) -> PlayStatus {
        let Some(track_id) = self.loaded_track_id() else {
            return PlayStatus::Ignored;
        };

        let status = self.start_device(&track_id);
        self.publish();
        status
    }

    /// Pause playback
    pub fn pause(&mut self) {
        if !self.device.is_loaded() {
            return;
        }

        self.device.pause();
        self.publish();
    }

    /// Pause when playing, resume when paused
    pub fn toggle_play_pause(&mut self) -> PlayStatus {
        if !self.device.is_loaded() {
            return PlayStatus::Ignored;
        }

        if self.device.is_paused() {
            self.play()
        } else {
            self.pause();
            PlayStatus::Paused
        }
    }

    fn loaded_track_id(&self) -> Option<TrackId> {
        if !self.device.is_loaded() {
            return None;
        }
        self.queue.current().map(|track| track.id.clone())
    }

    /// Seek within the loaded track
    ///
    /// Clamped to `[0, duration]` when the duration is known.
    pub fn seek(&mut self, seconds: f64) {
        if !self.device.is_loaded() {
            return;
        }

        let mut target = if seconds.is_nan() { 0.0 } else { seconds.max(0.0) };
        if let Some(duration) = self.device.duration() {
            target = target.min(duration.as_secs_f64());
        }

        let Ok(position) = Duration::try_from_secs_f64(target) else {
            debug!("Ignoring seek to {}", seconds);
            return;
        };

        if let Err(err) = self.device.seek(position) {
            warn!("Seek to {:?} failed: {}", position, err);
        }
        self.publish();
    }

    // ===== Volume & Modes =====

    /// Set nominal volume (clamped to [0.0, 1.0]) and unmute
    pub fn set_volume(&mut self, level: f32) {
        self.volume.set_level(level);
        self.volume.unmute();
        self.device.set_volume(self.volume.gain());
        self.publish();
    }

    /// Toggle mute
    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.device.set_volume(self.volume.gain());
        self.publish();
    }

    /// Toggle loop mode
    pub fn toggle_loop(&mut self) {
        self.loop_enabled = !self.loop_enabled;
        self.publish();
    }

    /// Toggle shuffle mode
    pub fn toggle_shuffle(&mut self) {
        self.shuffle = !self.shuffle;
        self.publish();
    }

    // ===== Navigation =====

    /// Skip to the next track
    ///
    /// Shuffle picks any index (possibly the current one). Otherwise the
    /// cursor moves forward, wrapping with loop on. Running off the end with
    /// loop off leaves the last track loaded and paused.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> PlayStatus {
        if self.queue.is_empty() {
            return PlayStatus::Ignored;
        }

        if self.shuffle {
            return match pick_index(self.queue.len(), &mut self.rng) {
                Some(index) => self.play_at_index(index),
                None => PlayStatus::Ignored,
            };
        }

        match self.queue.advance(self.loop_enabled) {
            Advance::Empty => PlayStatus::Ignored,
            Advance::Play(index) => self.play_at_index(index),
            Advance::Exhausted { last } => {
                debug!("End of queue reached at index {}", last);
                self.queue.set_cursor(last);
                self.device.pause();
                self.publish();
                PlayStatus::EndOfQueue
            }
        }
    }

    /// Restart the current track, or go back one
    ///
    /// Past the restart threshold the current track restarts from zero.
    /// Otherwise the cursor moves back one, clamped at the first track.
    pub fn previous(&mut self) -> PlayStatus {
        let Some(index) = self.queue.previous_index() else {
            return PlayStatus::Ignored;
        };

        if self.device.is_loaded() && self.device.position() > self.restart_threshold {
            if let Err(err) = self.device.seek(Duration::ZERO) {
                warn!("Restart seek failed: {}", err);
            }

            let status = match self.loaded_track_id() {
                Some(track_id) => self.start_device(&track_id),
                None => PlayStatus::Ignored,
            };
            self.publish();
            return status;
        }

        self.play_at_index(index)
    }

    // ===== Library =====

    /// Persist a track record and append it to the queue
    ///
    /// An identifier is assigned when the record has none. A record whose id
    /// is already queued replaces that entry in place.
    pub async fn add_track(&mut self, record: CreateTrack) -> Result<Track> {
        let track = record.into_track();

        if let Err(err) = self.store.put(&track).await {
            self.storage_failed("put", &err);
            return Err(PlaybackError::Store(err));
        }

        let index = self.queue.upsert(track.clone());
        debug!("Added track {} at index {}", track.id, index);
        self.publish();
        Ok(track)
    }

    /// Delete a track from the store and the queue
    ///
    /// Returns the removed track, or `None` if it was not queued.
    pub async fn remove_track(&mut self, id: &TrackId) -> Result<Option<Track>> {
        if let Err(err) = self.store.delete(id).await {
            self.storage_failed("delete", &err);
            return Err(PlaybackError::Store(err));
        }

        let Some(removed) = self.queue.remove(id) else {
            return Ok(None);
        };

        if removed.was_current {
            self.device.stop();
        }
        debug!("Removed track {} from index {}", removed.track.id, removed.index);
        self.publish();
        Ok(Some(removed.track))
    }

    /// Delete every track
    pub async fn clear_library(&mut self) -> Result<()> {
        if let Err(err) = self.store.clear().await {
            self.storage_failed("clear", &err);
            return Err(PlaybackError::Store(err));
        }

        self.queue.clear();
        self.device.stop();
        self.publish();
        Ok(())
    }

    /// Fill the queue from the store
    ///
    /// A failed read leaves the library empty and raises a notice. Returns
    /// the number of tracks loaded.
    pub async fn load_library(&mut self) -> usize {
        match self.store.get_all().await {
            Ok(tracks) => {
                self.device.stop();
                self.queue = Queue::from_tracks(tracks);
                debug!("Loaded {} tracks from store", self.queue.len());
            }
            Err(err) => {
                self.storage_failed("get_all", &err);
                self.device.stop();
                self.queue.clear();
            }
        }

        self.publish();
        self.queue.len()
    }

    fn storage_failed(&self, operation: &str, err: &CoreError) {
        error!("Track store {} failed: {}", operation, err);
        self.notify(Notice::StorageFailed {
            operation: operation.to_string(),
            reason: err.to_string(),
        });
    }

    // ===== Device Events =====

    /// React to an asynchronous device event
    pub fn handle_device_event(&mut self, event: DeviceEvent) {
        match event {
            DeviceEvent::PositionAdvanced | DeviceEvent::Playing | DeviceEvent::Paused => {
                self.publish();
            }
            DeviceEvent::Ended => {
                if self.next() == PlayStatus::Ignored {
                    self.publish();
                }
            }
            DeviceEvent::LoadFailed(reason) => {
                warn!("Device failed to load track: {}", reason);
                self.notify(Notice::LoadFailed {
                    track_id: self.queue.current().map(|track| track.id.clone()),
                    reason,
                });
                self.publish();
            }
        }
    }

    /// Handle every event already waiting on the channel
    ///
    /// Returns the number of events handled.
    pub fn drain_device_events(&mut self, events: &mut DeviceEventReceiver) -> usize {
        let mut handled = 0;
        while let Ok(event) = events.try_recv() {
            self.handle_device_event(event);
            handled += 1;
        }
        handled
    }

    // ===== State Queries =====

    /// Track queue
    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    /// Cursor into the queue
    pub fn cursor(&self) -> Option<usize> {
        self.queue.cursor()
    }

    /// Track under the cursor
    pub fn current_track(&self) -> Option<&Track> {
        self.queue.current()
    }

    /// Volume state
    pub fn volume(&self) -> &Volume {
        &self.volume
    }

    /// Loop flag
    pub fn loop_enabled(&self) -> bool {
        self.loop_enabled
    }

    /// Shuffle flag
    pub fn shuffle(&self) -> bool {
        self.shuffle
    }
}
