//! SQL rendering for well records.
//!
//! Each record becomes one single-row INSERT against a fixed column list.
//! Strings are single-quoted with embedded quotes doubled; absent values
//! render as `NULL`, never as `''`.

use crate::types::WellRecord;
use chrono::NaiveDate;
use std::fmt::Write;

/// Target table columns, in declared order.
pub const COLUMNS: [&str; 15] = [
    "api_number",
    "well_name",
    "well_number",
    "county",
    "operator",
    "well_type",
    "well_status",
    "section",
    "township",
    "range",
    "meridian",
    "latitude",
    "longitude",
    "spud_date",
    "completion_date",
];

/// A rendered SQL literal
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue<'a> {
    Null,
    Text(&'a str),
    Integer(i64),
    Real(f64),
    Date(NaiveDate),
}

impl<'a> SqlValue<'a> {
    fn text(value: Option<&'a str>) -> Self {
        value.map_or(SqlValue::Null, SqlValue::Text)
    }

    fn real(value: Option<f64>) -> Self {
        value.map_or(SqlValue::Null, SqlValue::Real)
    }

    fn date(value: Option<NaiveDate>) -> Self {
        value.map_or(SqlValue::Null, SqlValue::Date)
    }
}

impl std::fmt::Display for SqlValue<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SqlValue::Null => f.write_str("NULL"),
            SqlValue::Text(s) => write!(f, "'{}'", escape(s)),
            SqlValue::Integer(n) => write!(f, "{n}"),
            SqlValue::Real(v) if v.is_finite() => write!(f, "{v}"),
            SqlValue::Real(_) => f.write_str("NULL"),
            SqlValue::Date(d) => write!(f, "'{}'", d.format("%Y-%m-%d")),
        }
    }
}

/// Double every single quote so the text is safe inside `'...'`.
pub fn escape(s: &str) -> String {
    s.replace('\'', "''")
}

/// Values for `record`, aligned with [`COLUMNS`].
pub fn record_values(record: &WellRecord) -> [SqlValue<'_>; 15] {
    [
        SqlValue::Text(&record.api_number),
        SqlValue::text(record.well_name.as_deref()),
        SqlValue::text(record.well_number.as_deref()),
        SqlValue::text(record.county.as_deref()),
        SqlValue::text(record.operator.as_deref()),
        SqlValue::text(record.well_type.as_deref()),
        SqlValue::text(record.well_status.as_deref()),
        SqlValue::Integer(i64::from(record.section)),
        SqlValue::Text(&record.township),
        SqlValue::Text(&record.range),
        SqlValue::Text(record.meridian.code()),
        SqlValue::real(record.latitude),
        SqlValue::real(record.longitude),
        SqlValue::date(record.spud_date),
        SqlValue::date(record.completion_date),
    ]
}

/// Render one record as a single-row INSERT statement, terminated by `;`.
pub fn render_insert(table: &str, record: &WellRecord) -> String {
    let mut sql = String::with_capacity(256);
    let _ = write!(sql, "INSERT INTO {} ({}) VALUES (", table, COLUMNS.join(", "));
    for (i, value) in record_values(record).iter().enumerate() {
        if i > 0 {
            sql.push_str(", ");
        }
        let _ = write!(sql, "{value}");
    }
    sql.push_str(");");
    sql
}

/// Wrap rendered statements in one transaction.
pub fn render_batch(sequence: usize, statements: &[String]) -> String {
    let body_len: usize = statements.iter().map(|s| s.len() + 1).sum();
    let mut sql = String::with_capacity(body_len + 64);
    let _ = writeln!(sql, "-- wells import batch {sequence}: {} rows", statements.len());
    sql.push_str("BEGIN TRANSACTION;\n");
    for statement in statements {
        sql.push_str(statement);
        sql.push('\n');
    }
    sql.push_str("COMMIT;\n");
    sql
}
