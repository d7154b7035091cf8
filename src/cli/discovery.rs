//! File discovery for file-name batches
//!
//! Collects regular files under a directory, optionally recursing and
//! filtering file names by a glob pattern. Results are sorted so batch
//! indices are stable between runs.

use crate::error::{DecoderError, Result};
use glob::Pattern;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// File discovery component for upload directories
#[derive(Debug)]
pub struct FileDiscovery {
    root: PathBuf,
    pattern: Option<Pattern>,
    recursive: bool,
}

impl FileDiscovery {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            pattern: None,
            recursive: false,
        }
    }

    /// Only keep files whose name matches `pattern`
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self> {
        let compiled = Pattern::new(pattern).map_err(|e| {
            DecoderError::configuration(format!("Invalid file pattern '{}': {}", pattern, e))
        })?;
        self.pattern = Some(compiled);
        Ok(self)
    }

    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Discover matching files, sorted by path
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        if !self.root.is_dir() {
            return Err(DecoderError::configuration(format!(
                "Not a directory: {}",
                self.root.display()
            )));
        }

        debug!("Searching for files in: {}", self.root.display());

        let max_depth = if self.recursive { usize::MAX } else { 1 };
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.root).max_depth(max_depth) {
            let entry = entry.map_err(std::io::Error::from)?;
            if entry.file_type().is_file() && self.matches(entry.path()) {
                files.push(entry.into_path());
            }
        }

        files.sort();
        debug!("Found {} files", files.len());
        Ok(files)
    }

    fn matches(&self, path: &Path) -> bool {
        match &self.pattern {
            Some(pattern) => path
                .file_name()
                .is_some_and(|name| pattern.matches(&name.to_string_lossy())),
            None => true,
        }
    }
}
