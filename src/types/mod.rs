//! Shared data structures for the wells import pipeline
//!
//! - Field: recognized input columns / JSON keys
//! - WellRecord / Meridian: one validated input row
//! - ImportSummary / RejectReason / WarningKind: run accounting

mod field;
mod well;
mod summary;

pub use field::*;
pub use well::*;
pub use summary::*;
