/// Application configuration
use crate::error::{CliError, Result};
use harmonic_playback::PlaybackConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file read from the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "harmonic.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HarmonicConfig {
    #[serde(default)]
    pub library: LibrarySettings,

    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LibrarySettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// `EnvFilter` directive, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file; when unset, logs go to stderr (and are dropped while the
    /// player owns the terminal)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl HarmonicConfig {
    /// Load configuration from file and environment
    ///
    /// `path` must exist when given. Without it, `harmonic.toml` in the
    /// working directory is read if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // HARMONIC_LIBRARY__DATABASE_URL, HARMONIC_PLAYBACK__VOLUME, ...
        settings = settings.add_source(
            config::Environment::with_prefix("HARMONIC")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.playback.volume) {
            return Err(CliError::Config(format!(
                "playback.volume must be between 0.0 and 1.0, got {}",
                self.playback.volume
            )));
        }

        let threshold = self.playback.restart_threshold_secs;
        if threshold.is_nan() || threshold < 0.0 {
            return Err(CliError::Config(format!(
                "playback.restart_threshold_secs must not be negative, got {}",
                threshold
            )));
        }

        if self.library.database_url.trim().is_empty() {
            return Err(CliError::Config(
                "library.database_url must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

fn default_database_url() -> String {
    "sqlite://harmonic.db".to_string()
}

fn default_log_level() -> String {
    "harmonic=info".to_string()
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}
