//! Well record types: WellRecord, Meridian

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// Meridian
// ============================================================================

/// Land-survey principal meridian for the township/range/section grid
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, Hash)]
pub enum Meridian {
    /// Indian Meridian
    #[default]
    IM,
    /// Cimarron Meridian
    CM,
}

impl Meridian {
    /// Parse a raw meridian code, case-insensitively.
    ///
    /// Returns `None` for anything other than `IM` or `CM`; the caller
    /// decides whether that becomes a default or a rejection.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "IM" => Some(Meridian::IM),
            "CM" => Some(Meridian::CM),
            _ => None,
        }
    }

    /// Two-letter code as stored in the wells table
    pub fn code(&self) -> &'static str {
        match self {
            Meridian::IM => "IM",
            Meridian::CM => "CM",
        }
    }
}

impl std::fmt::Display for Meridian {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

// ============================================================================
// Section
// ============================================================================

/// Lowest section number in a township
pub const SECTION_MIN: u8 = 1;
/// Highest section number in a township
pub const SECTION_MAX: u8 = 36;

// ============================================================================
// Well Record
// ============================================================================

/// One validated well row, ready to render as an INSERT.
///
/// Only the validator constructs these, so every instance carries a
/// non-empty `api_number`, a section in 1..=36 and a known meridian.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellRecord {
    /// API well number (natural key)
    pub api_number: String,
    pub well_name: Option<String>,
    pub well_number: Option<String>,
    pub county: Option<String>,
    pub operator: Option<String>,
    pub well_type: Option<String>,
    pub well_status: Option<String>,

    // === Legal Description ===
    /// Section number within the township (1-36)
    pub section: u8,
    /// Township, e.g. "9N"
    pub township: String,
    /// Range, e.g. "5W"
    pub range: String,
    pub meridian: Meridian,

    // === Location ===
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    // === Dates ===
    pub spud_date: Option<NaiveDate>,
    pub completion_date: Option<NaiveDate>,
}

impl WellRecord {
    /// Human-readable legal description, e.g. "S12-T9N-R5W IM"
    pub fn legal_description(&self) -> String {
        format!(
            "S{}-T{}-R{} {}",
            self.section, self.township, self.range, self.meridian
        )
    }
}
