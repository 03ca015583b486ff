//! Record validation and normalization
//!
//! Turns a [`RawRecord`] into a [`WellRecord`] or a [`RejectReason`].
//! Rules, applied in order:
//!
//! 1. `apiNumber` absent or blank: reject
//! 2. `section` not an integer in 1..=36: reject ("invalid section")
//! 3. `township` / `range` absent or blank: reject
//! 4. `meridian` not IM/CM (case-insensitive): substitute IM, warn
//! 5. `latitude`/`longitude`/dates unparsable: store NULL, warn
//!
//! Rejection and substitution are deliberately different policies:
//! a record without an identity or a location is useless, a record without
//! a meridian is almost always in Indian Meridian territory.
//!
//! Free-text fields are passed through untouched; quoting happens in the
//! SQL renderer.

use crate::input::RawRecord;
use crate::types::{Field, Meridian, RejectReason, WarningKind, WellRecord, SECTION_MAX, SECTION_MIN};
use chrono::NaiveDate;

/// An accepted record plus the normalizations applied to it
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRecord {
    pub record: WellRecord,
    pub warnings: Vec<WarningKind>,
}

/// Validate one raw row.
pub fn validate_record(raw: &RawRecord) -> Result<ValidatedRecord, RejectReason> {
    // 1. Identity
    let api_number = required_text(raw, Field::ApiNumber).ok_or(RejectReason::MissingApiNumber)?;

    // 2. Section
    let section = raw
        .get(Field::Section)
        .and_then(parse_section)
        .ok_or(RejectReason::InvalidSection)?;

    // 3. Township / range
    let township = required_text(raw, Field::Township).ok_or(RejectReason::MissingTownship)?;
    let range = required_text(raw, Field::Range).ok_or(RejectReason::MissingRange)?;

    let mut warnings = Vec::new();

    // 4. Meridian
    let meridian = match raw.get(Field::Meridian).and_then(Meridian::parse) {
        Some(m) => m,
        None => {
            warnings.push(WarningKind::MeridianDefaulted);
            Meridian::default()
        }
    };

    // 5. Optional typed fields
    let latitude = optional_typed(raw, Field::Latitude, parse_coordinate, WarningKind::InvalidLatitude, &mut warnings);
    let longitude = optional_typed(raw, Field::Longitude, parse_coordinate, WarningKind::InvalidLongitude, &mut warnings);
    let spud_date = optional_typed(raw, Field::SpudDate, parse_date, WarningKind::InvalidSpudDate, &mut warnings);
    let completion_date = optional_typed(
        raw,
        Field::CompletionDate,
        parse_date,
        WarningKind::InvalidCompletionDate,
        &mut warnings,
    );

    let text = |field| raw.get(field).map(str::to_string);

    Ok(ValidatedRecord {
        record: WellRecord {
            api_number,
            well_name: text(Field::WellName),
            well_number: text(Field::WellNumber),
            county: text(Field::County),
            operator: text(Field::Operator),
            well_type: text(Field::WellType),
            well_status: text(Field::WellStatus),
            section,
            township,
            range,
            meridian,
            latitude,
            longitude,
            spud_date,
            completion_date,
        },
        warnings,
    })
}

// ============================================================================
// Field Parsers
// ============================================================================

/// Trimmed value of a required text field, `None` when absent or blank
fn required_text(raw: &RawRecord, field: Field) -> Option<String> {
    raw.get(field)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Parse an optional field; a present-but-unparsable value records `warning`
/// and yields `None`.
fn optional_typed<T>(
    raw: &RawRecord,
    field: Field,
    parse: impl Fn(&str) -> Option<T>,
    warning: WarningKind,
    warnings: &mut Vec<WarningKind>,
) -> Option<T> {
    let value = raw.get(field)?;
    let parsed = parse(value);
    if parsed.is_none() {
        warnings.push(warning);
    }
    parsed
}

/// Section number, integer only, in 1..=36
pub fn parse_section(s: &str) -> Option<u8> {
    let n: i64 = s.trim().parse().ok()?;
    u8::try_from(n)
        .ok()
        .filter(|n| (SECTION_MIN..=SECTION_MAX).contains(n))
}

/// Any finite decimal number; no range check is applied
fn parse_coordinate(s: &str) -> Option<f64> {
    let v: f64 = s.trim().parse().ok()?;
    v.is_finite().then_some(v)
}

/// ISO 8601 date, or the date part of an ISO 8601 timestamp
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    None
}
