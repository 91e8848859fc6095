use std::fmt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Everything needed for one download-and-extract call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub db_code: String,
    pub token: String,
    pub output_path: Option<PathBuf>,
}

impl DownloadRequest {
    pub fn new(db_code: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            db_code: db_code.into(),
            token: token.into(),
            output_path: None,
        }
    }

    pub fn with_output_path(mut self, output_path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(output_path.into());
        self
    }
}

/// A database code that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseCode(String);

impl DatabaseCode {
    pub(crate) fn new_unchecked(code: String) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name the archive is stored under while it waits for extraction.
    pub fn archive_file_name(&self) -> String {
        format!("{}.zip", self.0)
    }
}

impl fmt::Display for DatabaseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A ZIP archive written by the downloader.
///
/// When the archive was placed in a generated temp directory, that directory is
/// removed once this value is dropped. Archives written to a caller-supplied
/// directory are left in place.
#[derive(Debug)]
pub struct DownloadedArchive {
    path: PathBuf,
    bytes_written: u64,
    guard: Option<TempDir>,
}

impl DownloadedArchive {
    pub(crate) fn new(path: PathBuf, bytes_written: u64, guard: Option<TempDir>) -> Self {
        Self {
            path,
            bytes_written,
            guard,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }
}

/// Result of a successful extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFile {
    /// The last extracted member, reported as the canonical output file
    pub path: PathBuf,
    /// Every extracted member, in archive order
    pub extracted: Vec<PathBuf>,
}
