//! Harmonic terminal player
//!
//! Library commands and the interactive player behind the `harmonic`
//! binary. Configuration comes from `harmonic.toml` and `HARMONIC_*`
//! environment variables.

pub mod commands;
pub mod config;
pub mod error;
pub mod keys;
pub mod player;
pub mod render;

pub use config::HarmonicConfig;
pub use error::{CliError, Result};
pub use player::Player;
