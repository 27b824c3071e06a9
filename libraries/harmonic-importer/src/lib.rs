//! Harmonic Music Importer
//!
//! Imports audio files into the library through the playback controller.
//!
//! # Architecture
//!
//! - `scanner`: Filesystem scanning for audio files
//! - `importer`: Sequential extract-then-add orchestration
//!
//! Import is strictly sequential: one extraction at a time, so the queue
//! order always matches the input order no matter how long each file takes.

mod error;
mod types;

pub mod importer;
pub mod scanner;

pub use error::ImportError;
pub use importer::Importer;
pub use scanner::FileScanner;
pub use types::{ImportProgress, ImportSummary};

/// Re-export commonly used types
pub type Result<T> = std::result::Result<T, ImportError>;
