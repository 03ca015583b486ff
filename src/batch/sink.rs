//! BatchSink trait: where rendered batch scripts go
//!
//! - `DirectorySink`: one file per batch in an output directory
//! - `MemorySink`: keeps batches in memory for tests
//! - `DiscardSink`: drops everything (dry runs)

use crate::error::ImportError;
use std::fs;
use std::path::{Path, PathBuf};

/// Destination for finished batch scripts.
///
/// The pipeline calls `write_batch` once per batch, in sequence order.
pub trait BatchSink {
    /// Store one batch. An existing entry with the same name is replaced.
    fn write_batch(&mut self, name: &str, contents: &str) -> Result<(), ImportError>;

    /// Sink name for logging
    fn sink_name(&self) -> &str;
}

// ============================================================================
// Directory Sink
// ============================================================================

/// Writes each batch to `<dir>/<name>`.
///
/// Files from an earlier run with the same name are overwritten without
/// warning; nothing else in the directory is touched.
#[derive(Debug)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Create the output directory (and parents) if needed.
    pub fn create(dir: impl AsRef<Path>) -> Result<Self, ImportError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|e| ImportError::OutputDir {
            path: dir.to_path_buf(),
            source: e,
        })?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl BatchSink for DirectorySink {
    fn write_batch(&mut self, name: &str, contents: &str) -> Result<(), ImportError> {
        let path = self.dir.join(name);
        fs::write(&path, contents).map_err(|e| ImportError::Write {
            path: path.clone(),
            source: e,
        })?;
        tracing::info!(file = %path.display(), bytes = contents.len(), "Wrote batch file");
        Ok(())
    }

    fn sink_name(&self) -> &str {
        "directory"
    }
}

// ============================================================================
// Memory Sink
// ============================================================================

/// Keeps `(name, contents)` pairs in write order.
#[derive(Debug, Default)]
pub struct MemorySink {
    batches: Vec<(String, String)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn batches(&self) -> &[(String, String)] {
        &self.batches
    }

    pub fn into_batches(self) -> Vec<(String, String)> {
        self.batches
    }
}

impl BatchSink for MemorySink {
    fn write_batch(&mut self, name: &str, contents: &str) -> Result<(), ImportError> {
        match self.batches.iter_mut().find(|(n, _)| n == name) {
            Some(existing) => existing.1 = contents.to_string(),
            None => self.batches.push((name.to_string(), contents.to_string())),
        }
        Ok(())
    }

    fn sink_name(&self) -> &str {
        "memory"
    }
}

// ============================================================================
// Discard Sink
// ============================================================================

/// Accepts and drops every batch.
#[derive(Debug, Default)]
pub struct DiscardSink;

impl BatchSink for DiscardSink {
    fn write_batch(&mut self, name: &str, contents: &str) -> Result<(), ImportError> {
        tracing::debug!(name, bytes = contents.len(), "Dry run, batch not written");
        Ok(())
    }

    fn sink_name(&self) -> &str {
        "dry-run"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_directory_sink_creates_nested_dir() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("a").join("b");
        let mut sink = DirectorySink::create(&out).unwrap();
        assert!(out.is_dir());

        sink.write_batch("x_0001.sql", "COMMIT;\n").unwrap();
        assert_eq!(fs::read_to_string(out.join("x_0001.sql")).unwrap(), "COMMIT;\n");
    }

    #[test]
    fn test_directory_sink_overwrites_silently() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("x_0001.sql"), "stale contents from an older run").unwrap();
        fs::write(temp.path().join("unrelated.txt"), "keep me").unwrap();

        let mut sink = DirectorySink::create(temp.path()).unwrap();
        sink.write_batch("x_0001.sql", "fresh").unwrap();

        assert_eq!(fs::read_to_string(temp.path().join("x_0001.sql")).unwrap(), "fresh");
        assert_eq!(fs::read_to_string(temp.path().join("unrelated.txt")).unwrap(), "keep me");
    }

    #[test]
    fn test_directory_sink_fails_when_path_is_a_file() {
        let temp = tempdir().unwrap();
        let blocker = temp.path().join("not_a_dir");
        fs::write(&blocker, "").unwrap();
        let result = DirectorySink::create(blocker.join("out"));
        assert!(matches!(result, Err(ImportError::OutputDir { .. })));
    }

    #[test]
    fn test_memory_sink_keeps_order_and_replaces() {
        let mut sink = MemorySink::new();
        sink.write_batch("b1", "one").unwrap();
        sink.write_batch("b2", "two").unwrap();
        sink.write_batch("b1", "uno").unwrap();
        assert_eq!(
            sink.batches(),
            &[
                ("b1".to_string(), "uno".to_string()),
                ("b2".to_string(), "two".to_string())
            ]
        );
    }

    #[test]
    fn test_discard_sink_accepts_everything() {
        let mut sink = DiscardSink;
        sink.write_batch("x_0001.sql", "BEGIN TRANSACTION;\nCOMMIT;\n").unwrap();
        sink.write_batch("x_0001.sql", "again").unwrap();
        assert_eq!(sink.sink_name(), "dry-run");
    }
}
