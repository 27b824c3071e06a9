//! One-shot library commands

use crate::config::HarmonicConfig;
use crate::error::{CliError, Result};
use crate::render::track_row;
use harmonic_core::{Track, TrackId};
use harmonic_importer::{ImportSummary, Importer};
use harmonic_metadata::LoftyExtractor;
use harmonic_playback::{OutputDevice, PlaybackController};
use harmonic_storage::SqliteTrackStore;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Open the configured library and load it into a new controller
pub async fn open_library(
    config: &HarmonicConfig,
    device: Box<dyn OutputDevice>,
) -> Result<PlaybackController> {
    let store = SqliteTrackStore::open(&config.library.database_url).await?;

    let mut controller = PlaybackController::new(config.playback.clone(), device, Arc::new(store));
    let count = controller.load_library().await;
    debug!("Loaded {} tracks", count);
    Ok(controller)
}

/// Import files and directories, in argument order
pub async fn import(
    controller: &mut PlaybackController,
    importer: &Importer,
    paths: Vec<PathBuf>,
) -> Result<ImportSummary> {
    let mut summary = ImportSummary::default();

    for path in paths {
        if path.is_dir() {
            summary.merge(importer.import_directory(controller, &path).await?);
        } else {
            summary.merge(importer.import_files(controller, [path]).await);
        }
    }

    Ok(summary)
}

/// Importer backed by the tag reader
pub fn default_importer() -> Importer {
    Importer::new(Arc::new(LoftyExtractor::new()))
}

/// Print the library, one numbered row per track
pub fn list(controller: &PlaybackController, out: &mut impl Write) -> Result<()> {
    let tracks = controller.queue().tracks();
    if tracks.is_empty() {
        writeln!(out, "Library is empty")?;
        return Ok(());
    }

    for (position, track) in tracks.iter().enumerate() {
        writeln!(out, "{}", track_row(position, track))?;
    }
    Ok(())
}

/// Delete a track by id
pub async fn remove(controller: &mut PlaybackController, id: &str) -> Result<Track> {
    controller
        .remove_track(&TrackId::new(id))
        .await?
        .ok_or_else(|| CliError::UnknownTrack(id.to_string()))
}

/// Delete every track; returns how many were removed
pub async fn clear(controller: &mut PlaybackController) -> Result<usize> {
    let count = controller.queue().len();
    controller.clear_library().await?;
    Ok(count)
}
