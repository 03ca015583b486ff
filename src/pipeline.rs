//! Import pipeline: raw rows -> validation -> SQL -> batches.
//!
//! One pass, one thread. Each row is validated once and rendered once;
//! the rendered statement is the only thing kept until its batch is
//! written. All counters live in the returned [`ImportSummary`].

use crate::batch::{BatchSink, BatchWriter};
use crate::config::ImportConfig;
use crate::error::ImportError;
use crate::input::{RawRow, RecordSource};
use crate::sql::render_insert;
use crate::types::{Field, ImportSummary};
use crate::validate::validate_record;
use std::path::Path;
use tracing::{debug, info, warn};

/// Runs imports with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct ImportPipeline {
    config: ImportConfig,
}

impl ImportPipeline {
    pub fn new(config: ImportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Import a CSV or JSON file into `sink`.
    pub fn import_file<S: BatchSink + ?Sized>(
        &self,
        path: &Path,
        sink: &mut S,
    ) -> Result<ImportSummary, ImportError> {
        let source = RecordSource::open(path)?;
        self.run(source, sink)
    }

    /// Validate, render and partition `rows`.
    ///
    /// Only sink failures are returned as errors; bad rows are logged and
    /// counted in the summary.
    pub fn run<I, S>(&self, rows: I, sink: &mut S) -> Result<ImportSummary, ImportError>
    where
        I: IntoIterator<Item = RawRow>,
        S: BatchSink + ?Sized,
    {
        let mut summary = ImportSummary::default();
        let table = self.config.sql.table.as_str();
        let mut writer = BatchWriter::new(sink, self.config.output.clone(), self.config.batch.max_rows);

        for row in rows {
            summary.rows_read += 1;

            let raw = match row {
                Ok(raw) => raw,
                Err(issue) => {
                    warn!(row = %issue.location, reason = %issue.reason, detail = %issue.detail, "Skipping unreadable row");
                    summary.record_rejection(issue.reason);
                    continue;
                }
            };

            let validated = match validate_record(&raw) {
                Ok(v) => v,
                Err(reason) => {
                    warn!(row = %raw.location, api_number = raw.get(Field::ApiNumber).unwrap_or(""), reason = %reason, "Rejected record");
                    summary.record_rejection(reason);
                    continue;
                }
            };

            for kind in &validated.warnings {
                warn!(row = %raw.location, api_number = %validated.record.api_number, warning = %kind, "Record normalized");
                summary.record_warning(*kind);
            }

            debug!(row = %raw.location, api_number = %validated.record.api_number, "Accepted record");
            writer.push(render_insert(table, &validated.record))?;
            summary.accepted += 1;
        }

        summary.batch_files = writer.finish()?;

        info!(
            rows = summary.rows_read,
            accepted = summary.accepted,
            rejected = summary.rejected_total(),
            warnings = summary.warnings_total(),
            batches = summary.batches_written(),
            "Import complete"
        );

        Ok(summary)
    }
}
