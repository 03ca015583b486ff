//! Wells Import: CSV/JSON to SQL batch importer
//!
//! Bulk-loads the mineral-rights wells table by turning an input file into
//! numbered, transaction-wrapped SQL scripts that an external driver
//! replays one file at a time.
//!
//! ## Architecture
//!
//! - **Input**: CSV or JSON file into a lazy stream of raw records
//! - **Validate**: required fields, section range, meridian default
//! - **SQL**: one INSERT per record against a fixed column list
//! - **Batch**: fixed-size `BEGIN TRANSACTION; ... COMMIT;` scripts to a sink
//!
//! ```ignore
//! use wells_import::{DirectorySink, ImportConfig, ImportPipeline};
//!
//! let config = ImportConfig::load();
//! let mut sink = DirectorySink::create(&config.output.directory)?;
//! let summary = ImportPipeline::new(config).import_file("wells.csv".as_ref(), &mut sink)?;
//! println!("{summary}");
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod input;
pub mod pipeline;
pub mod sample;
pub mod sql;
pub mod types;
pub mod validate;

pub use batch::{BatchSink, BatchWriter, DirectorySink, DiscardSink, MemorySink};
pub use config::{ConfigError, ConfigOverrides, ImportConfig};
pub use error::ImportError;
pub use input::{InputFormat, RawRecord, RecordSource};
pub use pipeline::ImportPipeline;
pub use types::{
    Field, ImportSummary, Meridian, RejectReason, WarningKind, WellRecord,
};
