//! CSV input: header row names the fields, one record per following line.

use super::{warn_unknown_key, Location, RawRecord, RawRow, RowIssue};
use crate::error::ImportError;
use crate::types::{Field, RejectReason};
use std::collections::HashSet;
use std::io::Read;

/// Stream records from a CSV reader.
///
/// The header is read eagerly so a file without a readable header fails
/// up front. Quoted fields may contain commas, doubled quotes and line
/// breaks. A line whose field count differs from the header is yielded
/// as a [`RowIssue`] and the stream carries on with the next line.
pub fn csv_records<R: Read>(reader: R) -> Result<impl Iterator<Item = RawRow>, ImportError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers().map_err(ImportError::CsvHeader)?.clone();
    let columns = bind_headers(&headers);
    let expected = headers.len();

    tracing::debug!(
        columns = expected,
        recognized = columns.iter().flatten().count(),
        "CSV header parsed"
    );

    Ok(rdr.into_records().map(move |result| {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                let line = e.position().map_or(0, csv::Position::line);
                return Err(RowIssue {
                    location: Location::Line(line),
                    reason: RejectReason::MalformedLine,
                    detail: e.to_string(),
                });
            }
        };

        let location = Location::Line(record.position().map_or(0, csv::Position::line));

        if record.len() != expected {
            return Err(RowIssue {
                location,
                reason: RejectReason::MalformedLine,
                detail: format!("expected {} fields, found {}", expected, record.len()),
            });
        }

        let mut raw = RawRecord::new(location);
        for (column, value) in columns.iter().zip(record.iter()) {
            if let Some(field) = column {
                if !value.is_empty() {
                    raw.insert(*field, value);
                }
            }
        }
        Ok(raw)
    }))
}

/// Map each header cell to a known field, logging unknown and duplicate columns.
fn bind_headers(headers: &csv::StringRecord) -> Vec<Option<Field>> {
    let mut seen = HashSet::new();
    headers
        .iter()
        .map(|name| match Field::from_key(name) {
            Some(field) if seen.insert(field) => Some(field),
            Some(field) => {
                tracing::warn!(column = name, field = %field, "Duplicate column for field, ignoring");
                None
            }
            None => {
                if !name.trim().is_empty() {
                    warn_unknown_key(name);
                }
                None
            }
        })
        .collect()
}
