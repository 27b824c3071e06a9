//! Sink watcher
//!
//! rodio has no end-of-track callback, so a background thread polls the sink
//! and turns what it sees into device events.

use crate::error::Result;
use harmonic_playback::{DeviceEvent, DeviceEventSender};
use rodio::Sink;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Poll interval for position ticks and end detection
pub const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// What the watcher knows about the loaded track
#[derive(Debug, Default)]
pub(crate) struct WatchState {
    /// A track is loaded
    pub active: bool,
    /// `Ended` already sent for the loaded track
    pub ended_reported: bool,
}

impl WatchState {
    /// Reset for a freshly loaded track
    pub fn arm(&mut self) {
        self.active = true;
        self.ended_reported = false;
    }

    /// Decide which event (if any) one poll produces
    ///
    /// `Ended` fires once per loaded track when the sink drains.
    pub fn poll(&mut self, paused: bool, empty: bool) -> Option<DeviceEvent> {
        if !self.active {
            return None;
        }

        if empty {
            if self.ended_reported {
                None
            } else {
                self.ended_reported = true;
                Some(DeviceEvent::Ended)
            }
        } else if paused {
            None
        } else {
            Some(DeviceEvent::PositionAdvanced)
        }
    }
}

/// Handle to the watcher thread; stops and joins it on drop
pub(crate) struct Watcher {
    shutdown: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Watcher {
    pub fn spawn(
        sink: Arc<Sink>,
        state: Arc<Mutex<WatchState>>,
        events: DeviceEventSender,
    ) -> Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let stop = shutdown.clone();

        let handle = thread::Builder::new()
            .name("harmonic-sink-watcher".to_string())
            .spawn(move || {
                while !stop.load(Ordering::Acquire) {
                    thread::sleep(POLL_INTERVAL);

                    let event = state
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .poll(sink.is_paused(), sink.empty());

                    if let Some(event) = event {
                        if events.send(event).is_err() {
                            tracing::debug!("Device event receiver dropped, stopping watcher");
                            break;
                        }
                    }
                }
            })?;

        Ok(Self {
            shutdown,
            handle: Some(handle),
        })
    }
}

impl Drop for Watcher {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
