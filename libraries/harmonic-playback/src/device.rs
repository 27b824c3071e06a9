//! Platform-agnostic output device trait
//!
//! Abstracts the platform's media output/decoding handle so the controller
//! can run against a desktop backend or a scripted fake in tests.

use crate::error::DeviceError;
use harmonic_core::Track;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc;

/// Platform-agnostic media output device
///
/// The controller is the only component allowed to drive a device. Devices
/// report asynchronous lifecycle changes as [`DeviceEvent`]s over the
/// channel created by [`device_event_channel`].
pub trait OutputDevice {
    /// Load a track, replacing whatever was loaded before
    ///
    /// A freshly loaded track is paused at position zero. On error the
    /// previously loaded track may be left in place; callers unload it
    /// with [`stop`](Self::stop).
    fn load(&mut self, track: &Track) -> Result<(), DeviceError>;

    /// Start or resume playback of the loaded track
    ///
    /// # Returns
    /// * `Ok(())` - Audio is (or will be) audible
    /// * `Err(_)` - Start refused (policy, decode failure, no track)
    fn play(&mut self) -> Result<(), DeviceError>;

    /// Pause playback (no-op when nothing is loaded)
    fn pause(&mut self);

    /// Unload the current track
    fn stop(&mut self);

    /// Seek within the loaded track; the device clamps to its own bounds
    fn seek(&mut self, position: Duration) -> Result<(), DeviceError>;

    /// Current playback position
    fn position(&self) -> Duration;

    /// Total duration of the loaded track, if known
    fn duration(&self) -> Option<Duration>;

    /// Whether playback is paused (true when nothing is loaded)
    fn is_paused(&self) -> bool;

    /// Whether a track is loaded
    fn is_loaded(&self) -> bool;

    /// Set the effective output volume (0.0-1.0)
    fn set_volume(&mut self, volume: f32);
}

/// Asynchronous lifecycle events emitted by a device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DeviceEvent {
    /// Playback position moved forward
    PositionAdvanced,

    /// Playback started or resumed
    Playing,

    /// Playback paused
    Paused,

    /// The loaded track played to its end
    Ended,

    /// The loaded track could not be opened or decoded
    LoadFailed(String),
}

/// Sending half of a device event channel
pub type DeviceEventSender = mpsc::UnboundedSender<DeviceEvent>;

/// Receiving half of a device event channel
pub type DeviceEventReceiver = mpsc::UnboundedReceiver<DeviceEvent>;

/// Create a channel for device events
///
/// The sender goes to the device (it may live on another thread), the
/// receiver to whoever owns the controller.
pub fn device_event_channel() -> (DeviceEventSender, DeviceEventReceiver) {
    mpsc::unbounded_channel()
}

/// Device that tracks load and pause state but renders nothing
///
/// Used where the controller only manages the library, such as one-shot
/// command-line operations.
#[derive(Debug, Default)]
pub struct NullDevice {
    loaded: bool,
    paused: bool,
}

impl OutputDevice for NullDevice {
    fn load(&mut self, _track: &Track) -> Result<(), DeviceError> {
        self.loaded = true;
        self.paused = true;
        Ok(())
    }

    fn play(&mut self) -> Result<(), DeviceError> {
        if !self.loaded {
            return Err(DeviceError::NoTrackLoaded);
        }
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn stop(&mut self) {
        self.loaded = false;
        self.paused = true;
    }

    fn seek(&mut self, _position: Duration) -> Result<(), DeviceError> {
        if self.loaded {
            Ok(())
        } else {
            Err(DeviceError::NoTrackLoaded)
        }
    }

    fn position(&self) -> Duration {
        Duration::ZERO
    }

    fn duration(&self) -> Option<Duration> {
        None
    }

    fn is_paused(&self) -> bool {
        !self.loaded || self.paused
    }

    fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn set_volume(&mut self, _volume: f32) {}
}
