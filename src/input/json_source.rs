//! JSON input: a single top-level array of objects.

use super::{warn_unknown_key, Location, RawRecord, RawRow, RowIssue};
use crate::error::ImportError;
use crate::types::{Field, RejectReason};
use serde_json::Value;
use std::collections::HashSet;
use std::io::{BufReader, Read};

/// Stream records from a JSON reader.
///
/// The document is parsed up front so a malformed file or a non-array
/// root fails before any row is produced. Elements are then converted
/// one at a time; an element that is not an object becomes a [`RowIssue`].
pub fn json_records<R: Read>(reader: R) -> Result<impl Iterator<Item = RawRow>, ImportError> {
    let root: Value = serde_json::from_reader(BufReader::new(reader))?;
    let items = match root {
        Value::Array(items) => items,
        other => return Err(ImportError::JsonRootNotArray(kind_name(&other))),
    };

    tracing::debug!(elements = items.len(), "JSON array parsed");

    let mut unknown_seen: HashSet<String> = HashSet::new();
    Ok(items.into_iter().enumerate().map(move |(index, item)| {
        let location = Location::Element(index);
        let map = match item {
            Value::Object(map) => map,
            other => {
                return Err(RowIssue {
                    location,
                    reason: RejectReason::NotAnObject,
                    detail: format!("found {}", kind_name(&other)),
                });
            }
        };

        let mut raw = RawRecord::new(location);
        for (key, value) in map {
            let Some(field) = Field::from_key(&key) else {
                if unknown_seen.insert(key.clone()) {
                    warn_unknown_key(&key);
                }
                continue;
            };
            if let Some(text) = value_text(value) {
                raw.insert(field, text);
            }
        }
        Ok(raw)
    }))
}

/// Textual form of a JSON value; `None` for null.
fn value_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        nested @ (Value::Array(_) | Value::Object(_)) => Some(nested.to_string()),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
