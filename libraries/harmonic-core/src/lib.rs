//! Harmonic Core
//!
//! Platform-agnostic core types, traits, and error handling for Harmonic.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `TrackId`, `CreateTrack`
//! - **Collaborator Traits**: `TrackStore` (durable library), `MetadataExtractor`
//!   (raw audio file → track record)
//! - **Error Handling**: Unified `CoreError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use harmonic_core::types::{CreateTrack, PLACEHOLDER_COVER};
//! use std::path::PathBuf;
//!
//! let record = CreateTrack::from_file_name(PathBuf::from("/music/Intro.mp3"));
//! let track = record.into_track();
//!
//! assert_eq!(track.title, "Intro");
//! assert_eq!(track.cover_or_placeholder(), PLACEHOLDER_COVER);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{CoreError, Result};
pub use traits::{MetadataExtractor, TrackStore};
pub use types::{CreateTrack, Track, TrackId};
