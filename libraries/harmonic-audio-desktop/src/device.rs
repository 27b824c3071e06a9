use crate::error::{AudioError, Result};
use crate::source::open_source;
use crate::watcher::{WatchState, Watcher};
use harmonic_core::Track;
use harmonic_playback::{DeviceError, DeviceEventSender, OutputDevice};
use rodio::{OutputStream, OutputStreamBuilder, Sink};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, warn};

struct Loaded {
    file: PathBuf,
    duration: Option<Duration>,
}

/// Output device on the default system audio output
///
/// One rodio sink lives for the whole session; loading a track clears it
/// and appends the new source paused at zero.
pub struct RodioDevice {
    // Dropping the stream silences the sink, so it is kept alive here
    _stream: OutputStream,
    sink: Arc<Sink>,
    state: Arc<Mutex<WatchState>>,
    loaded: Option<Loaded>,
    _watcher: Watcher,
}

impl RodioDevice {
    /// Open the default output and start the sink watcher
    ///
    /// Lifecycle events are sent on `events`.
    pub fn open(events: DeviceEventSender) -> Result<Self> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| AudioError::Stream(e.to_string()))?;
        // rodio logs to stderr when the stream is dropped, which garbles the terminal UI
        stream.log_on_drop(false);

        let sink = Arc::new(Sink::connect_new(stream.mixer()));
        sink.pause();

        let state = Arc::new(Mutex::new(WatchState::default()));
        let watcher = Watcher::spawn(sink.clone(), state.clone(), events)?;

        Ok(Self {
            _stream: stream,
            sink,
            state,
            loaded: None,
            _watcher: watcher,
        })
    }

    fn watch_state(&self) -> MutexGuard<'_, WatchState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Decode `file` into the (cleared) sink, paused at zero
    fn queue_file(&self, file: &Path) -> Result<Option<Duration>> {
        let (source, duration) = open_source(file)?;

        // Holding the watch lock keeps the watcher from seeing the empty
        // sink between clear and append.
        let mut state = self.watch_state();
        self.sink.clear();
        self.sink.append(source);
        self.sink.pause();
        state.arm();

        Ok(duration)
    }
}

impl OutputDevice for RodioDevice {
    fn load(&mut self, track: &Track) -> std::result::Result<(), DeviceError> {
        let decoded_duration = self.queue_file(&track.file).map_err(|err| {
            warn!("Could not load {}: {}", track.file.display(), err);
            DeviceError::from(err)
        })?;

        debug!("Loaded {}", track.file.display());
        self.loaded = Some(Loaded {
            file: track.file.clone(),
            duration: decoded_duration.or_else(|| track.duration()),
        });
        Ok(())
    }

    fn play(&mut self) -> std::result::Result<(), DeviceError> {
        let Some(loaded) = &self.loaded else {
            return Err(DeviceError::NoTrackLoaded);
        };

        // A drained sink replays the loaded track from the start
        if self.sink.empty() {
            let file = loaded.file.clone();
            self.queue_file(&file)?;
        }

        self.sink.play();
        Ok(())
    }

    fn pause(&mut self) {
        if self.loaded.is_some() {
            self.sink.pause();
        }
    }

    fn stop(&mut self) {
        let mut state = self.watch_state();
        self.sink.clear();
        state.active = false;
        drop(state);

        self.loaded = None;
    }

    fn seek(&mut self, position: Duration) -> std::result::Result<(), DeviceError> {
        let Some(loaded) = &self.loaded else {
            return Err(DeviceError::NoTrackLoaded);
        };

        let target = match loaded.duration {
            Some(duration) => position.min(duration),
            None => position,
        };

        self.sink
            .try_seek(target)
            .map_err(|e| DeviceError::from(AudioError::Seek(e.to_string())))
    }

    fn position(&self) -> Duration {
        if self.loaded.is_some() {
            self.sink.get_pos()
        } else {
            Duration::ZERO
        }
    }

    fn duration(&self) -> Option<Duration> {
        self.loaded.as_ref().and_then(|loaded| loaded.duration)
    }

    fn is_paused(&self) -> bool {
        self.loaded.is_none() || self.sink.is_paused() || self.sink.empty()
    }

    fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    fn set_volume(&mut self, volume: f32) {
        self.sink.set_volume(volume.clamp(0.0, 1.0));
    }
}
