//! Input parsing: CSV or JSON files into a lazy stream of raw records.
//!
//! The format is chosen from the file extension. Both parsers yield
//! [`RawRecord`]s keyed by [`Field`]; columns or keys that match no known
//! field are logged once and dropped. A row that cannot be read at all
//! comes through as a [`RowIssue`] so the pipeline can count it and move on.
//!
//! Absent values never appear in a `RawRecord`: an empty CSV cell, a JSON
//! `null` and a missing JSON key all leave the field unset. A JSON `""`
//! is kept as an empty string.

mod csv_source;
mod json_source;

pub use csv_source::csv_records;
pub use json_source::json_records;

use crate::config::validation::suggest_correction;
use crate::error::ImportError;
use crate::types::{Field, RejectReason};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

// ============================================================================
// Raw Records
// ============================================================================

/// Where a row came from, for warnings that must be traceable to the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// 1-based line in a CSV file (the header is line 1)
    Line(u64),
    /// 0-based element index in a JSON array
    Element(usize),
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::Line(n) => write!(f, "line {n}"),
            Location::Element(i) => write!(f, "element [{i}]"),
        }
    }
}

/// One unvalidated input row
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub location: Location,
    fields: BTreeMap<Field, String>,
}

impl RawRecord {
    pub fn new(location: Location) -> Self {
        Self {
            location,
            fields: BTreeMap::new(),
        }
    }

    /// Set a field value. The first value for a field wins.
    pub fn insert(&mut self, field: Field, value: impl Into<String>) {
        self.fields.entry(field).or_insert_with(|| value.into());
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    /// Raw value, `None` when the field was absent
    pub fn get(&self, field: Field) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A row the parser could not turn into a [`RawRecord`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowIssue {
    pub location: Location,
    pub reason: RejectReason,
    pub detail: String,
}

impl std::fmt::Display for RowIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} ({})", self.location, self.reason, self.detail)
    }
}

/// Item type produced by a [`RecordSource`]
pub type RawRow = Result<RawRecord, RowIssue>;

// ============================================================================
// Input Format
// ============================================================================

/// Supported input file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Json,
}

impl InputFormat {
    /// Pick the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, ImportError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("csv") => Ok(InputFormat::Csv),
            Some("json") => Ok(InputFormat::Json),
            _ => Err(ImportError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            InputFormat::Csv => "CSV",
            InputFormat::Json => "JSON",
        }
    }
}

// ============================================================================
// Record Source
// ============================================================================

/// Single-pass stream of raw rows from one input.
pub struct RecordSource {
    format: InputFormat,
    rows: Box<dyn Iterator<Item = RawRow>>,
}

impl RecordSource {
    /// Open `path` and pick the parser from its extension.
    ///
    /// Fails when the file is missing or unreadable, the extension is not
    /// recognized, the CSV header cannot be read, or the JSON root is not
    /// an array.
    pub fn open(path: &Path) -> Result<Self, ImportError> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ImportError::InputNotFound(path.to_path_buf())
            } else {
                ImportError::InputRead {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;
        let format = InputFormat::from_path(path)?;
        tracing::info!(file = %path.display(), format = format.name(), "Opened input");
        Self::from_reader(format, file)
    }

    /// Build a source over any reader, e.g. an in-memory buffer in tests.
    pub fn from_reader<R: Read + 'static>(format: InputFormat, reader: R) -> Result<Self, ImportError> {
        let rows: Box<dyn Iterator<Item = RawRow>> = match format {
            InputFormat::Csv => Box::new(csv_records(reader)?),
            InputFormat::Json => Box::new(json_records(reader)?),
        };
        Ok(Self { format, rows })
    }

    pub fn format(&self) -> InputFormat {
        self.format
    }
}

impl Iterator for RecordSource {
    type Item = RawRow;

    fn next(&mut self) -> Option<Self::Item> {
        self.rows.next()
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Log a column or key that matches no known field, with a suggestion if
/// it looks like a typo of one.
fn warn_unknown_key(key: &str) {
    let known = Field::ALL.iter().map(Field::canonical_name);
    match suggest_correction(key, known) {
        Some(s) => tracing::warn!(key, suggestion = %s, "Ignoring unknown field (did you mean '{}'?)", s),
        None => tracing::warn!(key, "Ignoring unknown field"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(InputFormat::from_path(Path::new("wells.csv")).unwrap(), InputFormat::Csv);
        assert_eq!(InputFormat::from_path(Path::new("WELLS.JSON")).unwrap(), InputFormat::Json);
        assert!(matches!(
            InputFormat::from_path(Path::new("wells.xlsx")),
            Err(ImportError::UnsupportedFormat(_))
        ));
        assert!(InputFormat::from_path(Path::new("wells")).is_err());
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let result = RecordSource::open(Path::new("/nonexistent/wells.csv"));
        assert!(matches!(result, Err(ImportError::InputNotFound(_))));
    }

    #[test]
    fn test_raw_record_first_value_wins() {
        let record = RawRecord::new(Location::Line(2))
            .with(Field::ApiNumber, "35-001")
            .with(Field::ApiNumber, "35-002");
        assert_eq!(record.get(Field::ApiNumber), Some("35-001"));
        assert_eq!(record.get(Field::County), None);
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_location_display() {
        assert_eq!(Location::Line(7).to_string(), "line 7");
        assert_eq!(Location::Element(0).to_string(), "element [0]");
    }
}
