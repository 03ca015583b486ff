//! Batch partitioning: groups rendered INSERTs into transaction-wrapped
//! scripts of at most `max_rows` statements and hands them to a sink.
//!
//! Batches are numbered from 1 and only ever emitted full, except the last
//! one, so `n` statements produce `ceil(n / max_rows)` batches.

mod sink;

pub use sink::{BatchSink, DirectorySink, DiscardSink, MemorySink};

use crate::config::OutputConfig;
use crate::error::ImportError;
use crate::sql::render_batch;

/// Streaming partitioner over a [`BatchSink`].
pub struct BatchWriter<'a, S: BatchSink + ?Sized> {
    sink: &'a mut S,
    naming: OutputConfig,
    max_rows: usize,
    pending: Vec<String>,
    next_sequence: usize,
    written: Vec<String>,
}

impl<'a, S: BatchSink + ?Sized> BatchWriter<'a, S> {
    /// `max_rows` of zero is treated as one; config validation rejects it
    /// before it gets here.
    pub fn new(sink: &'a mut S, naming: OutputConfig, max_rows: usize) -> Self {
        let max_rows = max_rows.max(1);
        Self {
            sink,
            naming,
            max_rows,
            pending: Vec::with_capacity(max_rows.min(4096)),
            next_sequence: 1,
            written: Vec::new(),
        }
    }

    /// Queue one statement, emitting a batch when it fills up.
    pub fn push(&mut self, statement: String) -> Result<(), ImportError> {
        self.pending.push(statement);
        if self.pending.len() >= self.max_rows {
            self.flush()?;
        }
        Ok(())
    }

    /// Statements queued but not yet written
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Emit the final partial batch (if any) and return all batch names.
    pub fn finish(mut self) -> Result<Vec<String>, ImportError> {
        self.flush()?;
        Ok(self.written)
    }

    fn flush(&mut self) -> Result<(), ImportError> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let sequence = self.next_sequence;
        let name = self.naming.batch_file_name(sequence);
        let contents = render_batch(sequence, &self.pending);
        self.sink.write_batch(&name, &contents)?;

        tracing::debug!(
            batch = sequence,
            rows = self.pending.len(),
            sink = self.sink.sink_name(),
            "Batch emitted"
        );

        self.pending.clear();
        self.next_sequence += 1;
        self.written.push(name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statements(n: usize) -> impl Iterator<Item = String> {
        (0..n).map(|i| format!("INSERT {i};"))
    }

    fn run(n: usize, max_rows: usize) -> Vec<(String, String)> {
        let mut sink = MemorySink::new();
        let mut writer = BatchWriter::new(&mut sink, OutputConfig::default(), max_rows);
        for s in statements(n) {
            writer.push(s).unwrap();
        }
        writer.finish().unwrap();
        sink.into_batches()
    }

    fn row_count(contents: &str) -> usize {
        contents.lines().filter(|l| l.starts_with("INSERT")).count()
    }

    #[test]
    fn test_2500_rows_make_three_batches() {
        let batches = run(2500, 1000);
        let sizes: Vec<usize> = batches.iter().map(|(_, c)| row_count(c)).collect();
        assert_eq!(sizes, vec![1000, 1000, 500]);
        let names: Vec<&str> = batches.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            vec!["wells_import_0001.sql", "wells_import_0002.sql", "wells_import_0003.sql"]
        );
    }

    #[test]
    fn test_exact_multiple_has_no_empty_tail() {
        let batches = run(20, 10);
        assert_eq!(batches.len(), 2);
        assert!(batches.iter().all(|(_, c)| row_count(c) == 10));
    }

    #[test]
    fn test_no_rows_no_batches() {
        assert!(run(0, 10).is_empty());
    }

    #[test]
    fn test_order_preserved_across_batches() {
        let batches = run(7, 3);
        let all: Vec<String> = batches
            .iter()
            .flat_map(|(_, c)| c.lines().filter(|l| l.starts_with("INSERT")).map(str::to_string))
            .collect();
        let expected: Vec<String> = statements(7).collect();
        assert_eq!(all, expected);
    }

    #[test]
    fn test_every_batch_is_a_transaction() {
        for (_, contents) in run(5, 2) {
            assert!(contents.contains("BEGIN TRANSACTION;\n"));
            assert!(contents.ends_with("COMMIT;\n"));
        }
    }
}
