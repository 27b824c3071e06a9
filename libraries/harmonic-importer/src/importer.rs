//! Import orchestration

use crate::{scanner::FileScanner, ImportProgress, ImportSummary, Result};
use harmonic_core::MetadataExtractor;
use harmonic_metadata::is_supported_audio;
use harmonic_playback::PlaybackController;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Imports audio files into the library
///
/// Each file is extracted and then handed to
/// [`PlaybackController::add_track`], which persists it and appends it to
/// the queue. A failing file is recorded and the batch continues.
pub struct Importer {
    extractor: Arc<dyn MetadataExtractor>,
    scanner: FileScanner,
    progress_tx: Option<mpsc::UnboundedSender<ImportProgress>>,
}

impl Importer {
    /// Create a new importer
    pub fn new(extractor: Arc<dyn MetadataExtractor>) -> Self {
        Self {
            extractor,
            scanner: FileScanner::new(),
            progress_tx: None,
        }
    }

    /// Use a custom directory scanner
    pub fn with_scanner(mut self, scanner: FileScanner) -> Self {
        self.scanner = scanner;
        self
    }

    /// Report progress on `tx` after every file
    pub fn with_progress(mut self, tx: mpsc::UnboundedSender<ImportProgress>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    /// Import a batch of files, in order
    ///
    /// Files with an unrecognised extension are skipped. Per-file failures
    /// never abort the batch.
    pub async fn import_files<I>(
        &self,
        controller: &mut PlaybackController,
        files: I,
    ) -> ImportSummary
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let files: Vec<PathBuf> = files.into_iter().collect();
        let mut progress = ImportProgress::new(files.len());
        let mut summary = ImportSummary::default();

        for file_path in files {
            progress.current_file = Some(file_path.clone());

            if is_supported_audio(&file_path) {
                // Awaited one at a time so queue order follows input order
                let record = self.extractor.extract(&file_path).await;

                match controller.add_track(record).await {
                    Ok(track) => {
                        tracing::debug!("Imported {} as {}", file_path.display(), track.id);
                        summary.imported += 1;
                        progress.imported += 1;
                    }
                    Err(e) => {
                        tracing::error!("Failed to import {:?}: {}", file_path, e);
                        summary.errors.push((file_path.clone(), e.to_string()));
                        summary.failed += 1;
                    }
                }
            } else {
                tracing::debug!("Skipping unsupported file {}", file_path.display());
                summary.skipped += 1;
            }

            progress.processed_files += 1;
            self.report(&progress);
        }

        tracing::info!(
            "Import finished: {} imported, {} skipped, {} failed",
            summary.imported,
            summary.skipped,
            summary.failed
        );
        summary
    }

    /// Scan a directory and import every audio file found
    pub async fn import_directory(
        &self,
        controller: &mut PlaybackController,
        dir: &Path,
    ) -> Result<ImportSummary> {
        let files = self.scanner.scan_directory(dir)?;
        tracing::info!("Found {} audio files in {}", files.len(), dir.display());
        Ok(self.import_files(controller, files).await)
    }

    fn report(&self, progress: &ImportProgress) {
        if let Some(tx) = &self.progress_tx {
            // Receiver gone means nobody is watching
            let _ = tx.send(progress.clone());
        }
    }
}
