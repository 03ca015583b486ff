//! Import run accounting: rejection reasons, warning kinds, and the summary
//! returned by the pipeline.

use serde::Serialize;
use std::collections::BTreeMap;

// ============================================================================
// Rejections
// ============================================================================

/// Why an input row was dropped instead of rendered
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RejectReason {
    /// `apiNumber` absent or blank
    MissingApiNumber,
    /// `section` absent, not an integer, or outside 1..=36
    InvalidSection,
    /// `township` absent or blank
    MissingTownship,
    /// `range` absent or blank
    MissingRange,
    /// CSV line whose field count differs from the header, or undecodable
    MalformedLine,
    /// JSON array element that is not an object
    NotAnObject,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::MissingApiNumber => "missing apiNumber",
            RejectReason::InvalidSection => "invalid section",
            RejectReason::MissingTownship => "missing township",
            RejectReason::MissingRange => "missing range",
            RejectReason::MalformedLine => "malformed line",
            RejectReason::NotAnObject => "not an object",
        }
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Warnings
// ============================================================================

/// A normalization applied to an accepted record
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WarningKind {
    /// Meridian missing or not IM/CM, replaced with IM
    MeridianDefaulted,
    /// Latitude present but not a finite number, stored as NULL
    InvalidLatitude,
    /// Longitude present but not a finite number, stored as NULL
    InvalidLongitude,
    /// Spud date present but not a date, stored as NULL
    InvalidSpudDate,
    /// Completion date present but not a date, stored as NULL
    InvalidCompletionDate,
}

impl WarningKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningKind::MeridianDefaulted => "meridian defaulted to IM",
            WarningKind::InvalidLatitude => "invalid latitude dropped",
            WarningKind::InvalidLongitude => "invalid longitude dropped",
            WarningKind::InvalidSpudDate => "invalid spudDate dropped",
            WarningKind::InvalidCompletionDate => "invalid completionDate dropped",
        }
    }
}

impl std::fmt::Display for WarningKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Summary
// ============================================================================

/// Totals for one pipeline run.
///
/// `rows_read == accepted + rejected_total()` always holds: every row or
/// malformed line is counted exactly once on one side.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ImportSummary {
    /// Data rows / array elements seen, including malformed ones
    pub rows_read: usize,
    /// Records rendered into a batch
    pub accepted: usize,
    /// Rejections keyed by reason
    pub rejected: BTreeMap<RejectReason, usize>,
    /// Warnings keyed by kind (a record can carry several)
    pub warnings: BTreeMap<WarningKind, usize>,
    /// Batch files written, in sequence order
    pub batch_files: Vec<String>,
}

impl ImportSummary {
    pub fn record_rejection(&mut self, reason: RejectReason) {
        *self.rejected.entry(reason).or_insert(0) += 1;
    }

    pub fn record_warning(&mut self, kind: WarningKind) {
        *self.warnings.entry(kind).or_insert(0) += 1;
    }

    pub fn rejected_total(&self) -> usize {
        self.rejected.values().sum()
    }

    pub fn warnings_total(&self) -> usize {
        self.warnings.values().sum()
    }

    pub fn rejected_for(&self, reason: RejectReason) -> usize {
        self.rejected.get(&reason).copied().unwrap_or(0)
    }

    pub fn warnings_for(&self, kind: WarningKind) -> usize {
        self.warnings.get(&kind).copied().unwrap_or(0)
    }

    pub fn batches_written(&self) -> usize {
        self.batch_files.len()
    }
}

impl std::fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Import Summary ===")?;
        writeln!(f, "  Rows read:   {}", self.rows_read)?;
        writeln!(f, "  Accepted:    {}", self.accepted)?;
        writeln!(f, "  Rejected:    {}", self.rejected_total())?;
        for (reason, count) in &self.rejected {
            writeln!(f, "    {:<24} {}", reason.as_str(), count)?;
        }
        writeln!(f, "  Warnings:    {}", self.warnings_total())?;
        for (kind, count) in &self.warnings {
            writeln!(f, "    {:<24} {}", kind.as_str(), count)?;
        }
        write!(f, "  Batch files: {}", self.batches_written())
    }
}
