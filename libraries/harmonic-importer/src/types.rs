use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Progress of a running import
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportProgress {
    /// Total number of files in the batch (before filtering)
    pub total_files: usize,

    /// Number of files processed so far
    pub processed_files: usize,

    /// Number of files imported so far
    pub imported: usize,

    /// Current file being processed
    pub current_file: Option<PathBuf>,
}

impl ImportProgress {
    pub fn new(total_files: usize) -> Self {
        Self {
            total_files,
            processed_files: 0,
            imported: 0,
            current_file: None,
        }
    }

    /// Completion percentage (0-100)
    pub fn percentage(&self) -> f32 {
        if self.total_files == 0 {
            100.0
        } else {
            (self.processed_files as f32 / self.total_files as f32) * 100.0
        }
    }
}

/// Outcome of an import batch
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportSummary {
    /// Tracks added to the library
    pub imported: usize,

    /// Files skipped because their extension is not a recognised audio type
    pub skipped: usize,

    /// Files that could not be stored
    pub failed: usize,

    /// Failure details, in input order
    pub errors: Vec<(PathBuf, String)>,
}

impl ImportSummary {
    /// Whether every candidate file was imported
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }

    /// Fold a later batch into this one
    pub fn merge(&mut self, other: ImportSummary) {
        self.imported += other.imported;
        self.skipped += other.skipped;
        self.failed += other.failed;
        self.errors.extend(other.errors);
    }
}
