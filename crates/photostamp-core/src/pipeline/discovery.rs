//! Input discovery: enumerate supported images in a directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::ProcessingConfig;

/// Finds processable images directly inside an input directory.
///
/// Enumeration is non-recursive and the result is sorted by file name so
/// batch runs are deterministic.
pub struct FileDiscovery {
    config: ProcessingConfig,
}

impl FileDiscovery {
    pub fn new(config: ProcessingConfig) -> Self {
        Self { config }
    }

    /// True when the path has an extension in the configured format list
    /// (case-insensitive).
    pub fn is_supported(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        let ext = ext.to_ascii_lowercase();
        self.config
            .supported_formats
            .iter()
            .any(|format| format.eq_ignore_ascii_case(&ext))
    }

    /// List supported image files in `dir`, sorted by file name.
    /// Subdirectories and unsupported files are skipped silently.
    pub fn discover(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() && self.is_supported(&path) {
                files.push(path);
            }
        }
        files.sort_by_key(|p| p.file_name().map(|n| n.to_os_string()));
        tracing::debug!(dir = %dir.display(), count = files.len(), "discovered input files");
        Ok(files)
    }
}
