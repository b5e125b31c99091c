//! CSV/TSV occurrence reader with delimiter detection.

use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{GeorefError, Result};
use crate::record::OccurrenceRecord;

use super::source::SourceMetadata;

/// Darwin Core headers (and aliases) that map to occurrence fields.
const KNOWN_COLUMNS: &[&str] = &[
    "occurrenceID",
    "country",
    "countryCode",
    "stateProvince",
    "county",
    "waterBody",
    "locality",
    "decimalLatitude",
    "decimalLongitude",
    "latitude",
    "longitude",
    "geodeticDatum",
    "maximumDepthInMeters",
    "dataGeneralizations",
];

/// Reader configuration.
#[derive(Debug, Clone, Default)]
pub struct ReaderConfig {
    /// Delimiter to use (None = detect comma or tab from the header line).
    pub delimiter: Option<u8>,
    /// Maximum records to read (None = all).
    pub max_rows: Option<usize>,
}

/// Reads occurrence records from delimited text files.
#[derive(Debug, Clone, Default)]
pub struct OccurrenceReader {
    config: ReaderConfig,
}

impl OccurrenceReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Read a file and return its records and metadata.
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<(Vec<OccurrenceRecord>, SourceMetadata)> {
        let path = path.as_ref();
        let contents = fs::read(path).map_err(|e| GeorefError::io(path, e))?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(&contents)?,
        };
        let (records, ignored) = self.read_bytes(&contents, delimiter)?;

        let format = match delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            _ => "delimited",
        }
        .to_string();

        debug!(path = %path.display(), format = %format, records = records.len(), "read occurrence file");

        let metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            contents.len() as u64,
            format,
            records.len(),
        )
        .with_ignored_columns(ignored);

        Ok((records, metadata))
    }

    /// Parse records from bytes, returning them with the header columns
    /// that were not recognized.
    pub fn read_bytes(&self, bytes: &[u8], delimiter: u8) -> Result<(Vec<OccurrenceRecord>, Vec<String>)> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(bytes);

        let headers = reader.headers()?.clone();
        if headers.is_empty() || headers.iter().all(str::is_empty) {
            return Err(GeorefError::EmptyData("No columns found".to_string()));
        }
        let ignored: Vec<String> = headers
            .iter()
            .filter(|h| !KNOWN_COLUMNS.contains(h))
            .map(str::to_string)
            .collect();

        let mut records = Vec::new();
        for (row_idx, result) in reader.deserialize::<OccurrenceRecord>().enumerate() {
            if self.config.max_rows.is_some_and(|max| row_idx >= max) {
                break;
            }
            records.push(result?);
        }

        if records.is_empty() {
            return Err(GeorefError::EmptyData("No data rows found".to_string()));
        }

        Ok((records, ignored))
    }
}

/// Pick tab or comma, whichever splits the header line into more fields.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let text = String::from_utf8_lossy(bytes);
    let header = text
        .lines()
        .find(|l| !l.trim().is_empty())
        .ok_or_else(|| GeorefError::EmptyData("No lines to analyze".to_string()))?;

    let tabs = count_delimiter_in_line(header, b'\t');
    let commas = count_delimiter_in_line(header, b',');
    Ok(if tabs > 0 && tabs >= commas { b'\t' } else { b',' })
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}
