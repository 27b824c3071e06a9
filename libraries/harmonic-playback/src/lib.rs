//! Harmonic - Playback Controller
//!
//! Platform-agnostic playback state machine for Harmonic.
//!
//! This crate provides:
//! - Flat track queue with a cursor
//! - Loop, shuffle, volume and mute
//! - Restart-vs-previous navigation
//! - Snapshot observers that may unsubscribe at any time, even mid-dispatch
//! - Non-fatal user notices (blocked playback, load and storage failures)
//!
//! # Architecture
//!
//! `harmonic-playback` never decodes audio and never touches a database:
//! - Audio output is an [`OutputDevice`] supplied by the platform
//! - Persistence is a [`harmonic_core::TrackStore`]
//! - Devices report lifecycle changes as [`DeviceEvent`]s, which the owner
//!   feeds back into [`PlaybackController::handle_device_event`]
//!
//! # Example
//!
//! ```rust,no_run
//! use harmonic_core::TrackStore;
//! use harmonic_playback::{OutputDevice, PlaybackConfig, PlaybackController};
//! use std::sync::Arc;
//!
//! fn start(device: Box<dyn OutputDevice>, store: Arc<dyn TrackStore>) {
//!     let mut controller = PlaybackController::new(PlaybackConfig::default(), device, store);
//!
//!     let subscription = controller.subscribe(|snapshot| {
//!         println!("index={:?} playing={}", snapshot.index, snapshot.is_playing);
//!     });
//!
//!     controller.play_at_index(0);
//!     controller.next();
//!     subscription.unsubscribe();
//! }
//! ```

mod controller;
mod device;
mod error;
mod events;
mod observers;
mod queue;
mod shuffle;
pub mod types;
mod volume;

// Public exports
pub use controller::PlaybackController;
pub use device::{
    device_event_channel, DeviceEvent, DeviceEventReceiver, DeviceEventSender, NullDevice,
    OutputDevice,
};
pub use error::{DeviceError, PlaybackError, Result};
pub use events::Notice;
pub use observers::Subscription;
pub use queue::{Advance, Queue, Removed};
pub use types::{PlayStatus, PlaybackConfig, PlaybackSnapshot};
pub use volume::Volume;
