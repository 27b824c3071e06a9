//! Harmonic Desktop Audio
//!
//! [`harmonic_playback::OutputDevice`] for desktop platforms, backed by
//! `rodio` on the default system output.
//!
//! Decoding, mixing and resampling happen inside rodio. A watcher thread
//! reports position ticks and end-of-track as
//! [`harmonic_playback::DeviceEvent`]s.
//!
//! # Example
//!
//! ```rust,no_run
//! use harmonic_audio_desktop::RodioDevice;
//! use harmonic_playback::device_event_channel;
//!
//! let (events_tx, _events_rx) = device_event_channel();
//! let device = RodioDevice::open(events_tx).expect("no audio output");
//! ```

mod device;
mod error;
mod source;
mod watcher;

pub use device::RodioDevice;
pub use error::{AudioError, Result};
pub use watcher::POLL_INTERVAL;
