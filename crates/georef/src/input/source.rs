//! Metadata about an occurrence file.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata about the source occurrence file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv or tsv).
    pub format: String,
    /// Number of occurrence records read.
    pub record_count: usize,
    /// Header columns that map to no occurrence field.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignored_columns: Vec<String>,
    /// When the file was read.
    pub read_at: DateTime<Utc>,
}

impl SourceMetadata {
    pub fn new(path: PathBuf, hash: String, size_bytes: u64, format: String, record_count: usize) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            record_count,
            ignored_columns: Vec::new(),
            read_at: Utc::now(),
        }
    }

    pub fn with_ignored_columns(mut self, columns: Vec<String>) -> Self {
        self.ignored_columns = columns;
        self
    }
}
