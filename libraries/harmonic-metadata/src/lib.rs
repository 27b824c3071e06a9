//! Harmonic Metadata
//!
//! Turns audio files into track records using `lofty`.
//!
//! Extraction never fails outward. When tags cannot be read the record falls
//! back to the file name as title, "Unknown Artist", "Unknown Album" and the
//! placeholder cover.
//!
//! # Example
//!
//! ```rust,no_run
//! use harmonic_core::MetadataExtractor;
//! use harmonic_metadata::LoftyExtractor;
//! use std::path::Path;
//!
//! # async fn example() {
//! let record = LoftyExtractor::new().extract(Path::new("/music/song.flac")).await;
//! println!("{} by {}", record.title, record.artist);
//! # }
//! ```

mod error;
mod extractor;
mod formats;
mod reader;

pub use error::{MetadataError, Result};
pub use extractor::LoftyExtractor;
pub use formats::{is_supported_audio, SUPPORTED_EXTENSIONS};
pub use reader::{data_uri, read_tags, TagData, MAX_ARTWORK_SIZE};
