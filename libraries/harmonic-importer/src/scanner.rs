//! File scanning for audio files

use crate::error::ImportError;
use crate::Result;
use harmonic_metadata::is_supported_audio;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Scanner for audio files in directories
#[derive(Debug, Clone, Default)]
pub struct FileScanner {
    /// Whether to follow symbolic links
    follow_links: bool,

    /// Maximum depth to traverse (unlimited when unset)
    max_depth: Option<usize>,
}

impl FileScanner {
    /// Create a new file scanner
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to follow symbolic links
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Set maximum directory depth to traverse
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Scan a directory for audio files
    ///
    /// Entries are visited sorted by file name, so the result order is
    /// stable across runs. Unreadable entries are skipped.
    pub fn scan_directory(&self, path: &Path) -> Result<Vec<PathBuf>> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.to_path_buf()));
        }

        if !path.is_dir() {
            return Err(ImportError::InvalidPath(format!(
                "{} is not a directory",
                path.display()
            )));
        }

        let mut walker = WalkDir::new(path)
            .follow_links(self.follow_links)
            .sort_by_file_name();

        if let Some(depth) = self.max_depth {
            walker = walker.max_depth(depth);
        }

        let mut audio_files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!("Skipping unreadable entry: {}", err);
                    continue;
                }
            };

            if entry.file_type().is_file() && is_supported_audio(entry.path()) {
                audio_files.push(entry.into_path());
            }
        }

        Ok(audio_files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn scan_finds_audio_in_name_order() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.flac"), b"").unwrap();
        fs::write(dir.path().join("a.mp3"), b"").unwrap();
        fs::write(dir.path().join("cover.jpg"), b"").unwrap();
        fs::create_dir(dir.path().join("disc2")).unwrap();
        fs::write(dir.path().join("disc2").join("c.ogg"), b"").unwrap();

        let files = FileScanner::new().scan_directory(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["a.mp3", "b.flac", "c.ogg"]);
    }

    #[test]
    fn max_depth_limits_recursion() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("top.wav"), b"").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("deep.wav"), b"").unwrap();

        let files = FileScanner::new()
            .max_depth(1)
            .scan_directory(dir.path())
            .unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn scan_rejects_missing_and_non_directories() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("song.mp3");
        fs::write(&file, b"").unwrap();

        assert!(matches!(
            FileScanner::new().scan_directory(&dir.path().join("missing")),
            Err(ImportError::FileNotFound(_))
        ));
        assert!(matches!(
            FileScanner::new().scan_directory(&file),
            Err(ImportError::InvalidPath(_))
        ));
    }
}
