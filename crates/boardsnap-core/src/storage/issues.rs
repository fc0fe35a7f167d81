//! Issue export storage operations (JSON format)

use crate::{models::NormalizedIssue, Error, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Writes normalized issues to a single JSON file.
///
/// The file is a pretty-printed top-level array. Each write goes through its
/// own temporary file in the destination directory and is then renamed over
/// the destination, so readers never observe a half-written export.
pub struct IssueFileWriter {
    path: PathBuf,
}

impl IssueFileWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn write(&self, issues: &[NormalizedIssue]) -> Result<()> {
        if self.path.file_name().is_none() {
            return Err(Error::InvalidPath(self.path.display().to_string()));
        }

        let dir = match self.path.parent() {
            // `Path::new("file.json").parent()` is an empty path
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        let content = serde_json::to_string_pretty(issues)?;

        // Dropped (and removed) on any error before persist
        let mut temp_file = NamedTempFile::new_in(dir)?;
        temp_file.write_all(content.as_bytes())?;
        temp_file.flush()?;
        temp_file
            .persist(&self.path)
            .map_err(|e| Error::Io(e.error))?;

        Ok(())
    }

    pub fn read(&self) -> Result<Vec<NormalizedIssue>> {
        let content = std::fs::read_to_string(&self.path)?;
        let issues: Vec<NormalizedIssue> = serde_json::from_str(&content)?;
        Ok(issues)
    }
}
