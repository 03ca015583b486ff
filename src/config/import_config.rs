//! Import Configuration - batch sizing, output naming, and target table
//!
//! Every struct implements `Default`, so running without a config file
//! produces 1000-row batches named `wells_import_0001.sql`, ... in
//! `./sql-imports`, inserting into `wells`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "WELLS_IMPORT_CONFIG";

/// Config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "import_config.toml";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for an import run.
///
/// Load with `ImportConfig::load()` which searches:
/// 1. `$WELLS_IMPORT_CONFIG` env var
/// 2. `./import_config.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Batch partitioning
    #[serde(default)]
    pub batch: BatchConfig,

    /// Output directory and file naming
    #[serde(default)]
    pub output: OutputConfig,

    /// SQL rendering
    #[serde(default)]
    pub sql: SqlConfig,
}

impl ImportConfig {
    /// Load configuration using the standard search order:
    /// 1. `$WELLS_IMPORT_CONFIG` environment variable
    /// 2. `./import_config.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        let from_env = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        Self::load_first_of(from_env.as_deref(), Path::new(LOCAL_CONFIG_FILE))
    }

    /// Search order behind [`load`](Self::load) with explicit candidates.
    ///
    /// An `explicit` path that is missing or invalid is logged and skipped.
    /// A missing `local` file is skipped quietly; an invalid one is logged.
    pub fn load_first_of(explicit: Option<&Path>, local: &Path) -> Self {
        let candidates = explicit
            .into_iter()
            .chain(Some(local).filter(|p| p.exists()));

        for path in candidates {
            match Self::load_from_file(path) {
                Ok(config) => {
                    info!(path = %path.display(), "Loaded import config");
                    return config;
                }
                Err(e) => warn!(path = %path.display(), error = %e, "Ignoring import config"),
            }
        }

        info!("No usable import config found, using built-in defaults");
        Self::default()
    }

    /// Apply command-line values on top of the loaded config and re-check
    /// the result.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) -> Result<(), ConfigError> {
        if let Some(dir) = &overrides.output_dir {
            self.output.directory.clone_from(dir);
        }
        if let Some(n) = overrides.batch_size {
            self.batch.max_rows = n;
        }
        if let Some(table) = &overrides.table {
            self.sql.table.clone_from(table);
        }
        self.validate()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse and validate config from TOML text.
    ///
    /// Unknown keys are logged as warnings and otherwise ignored.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for unknown in super::validation::unknown_config_keys(contents) {
            warn!("{unknown}");
        }

        let config: Self = toml::from_str(contents)
            .map_err(|e| ConfigError::Parse(PathBuf::from("<inline>"), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Validate value ranges.
    ///
    /// Rules:
    /// - `batch.max_rows` must be > 0
    /// - `output.sequence_width` must be in 1..=12
    /// - `output.file_prefix`/`file_suffix` must not contain path separators
    /// - `sql.table` must be a plain identifier
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        if self.batch.max_rows == 0 {
            errors.push("batch.max_rows must be > 0".to_string());
        }

        if !(1..=MAX_SEQUENCE_WIDTH).contains(&self.output.sequence_width) {
            errors.push(format!(
                "output.sequence_width = {} must be between 1 and {}",
                self.output.sequence_width, MAX_SEQUENCE_WIDTH
            ));
        }

        for (key, value) in [
            ("output.file_prefix", &self.output.file_prefix),
            ("output.file_suffix", &self.output.file_suffix),
        ] {
            if value.contains('/') || value.contains('\\') {
                errors.push(format!("{key} = '{value}' must not contain path separators"));
            }
        }

        if !is_plain_identifier(&self.sql.table) {
            errors.push(format!(
                "sql.table = '{}' must be letters, digits and underscores, not starting with a digit",
                self.sql.table
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

/// Values given on the command line; each one replaces its config key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// `output.directory`
    pub output_dir: Option<PathBuf>,
    /// `batch.max_rows`
    pub batch_size: Option<usize>,
    /// `sql.table`
    pub table: Option<String>,
}

/// Widest zero-padded sequence number accepted in file names
pub const MAX_SEQUENCE_WIDTH: usize = 12;

fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// ============================================================================
// Sections
// ============================================================================

/// Batch partitioning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Maximum INSERT statements per batch file
    pub max_rows: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { max_rows: 1000 }
    }
}

/// Output directory and batch file naming
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory batch files are written to (created if absent)
    pub directory: PathBuf,
    /// Constant text before the sequence number
    pub file_prefix: String,
    /// Constant text after the sequence number
    pub file_suffix: String,
    /// Zero-padded width of the sequence number
    pub sequence_width: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("./sql-imports"),
            file_prefix: "wells_import_".to_string(),
            file_suffix: ".sql".to_string(),
            sequence_width: 4,
        }
    }
}

impl OutputConfig {
    /// File name for the batch with 1-based `sequence`.
    ///
    /// Lexicographic order equals numeric order as long as the sequence
    /// fits in `sequence_width` digits.
    pub fn batch_file_name(&self, sequence: usize) -> String {
        format!(
            "{}{:0width$}{}",
            self.file_prefix,
            sequence,
            self.file_suffix,
            width = self.sequence_width
        )
    }
}

/// SQL rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SqlConfig {
    /// Target table for the INSERT statements
    pub table: String,
}

impl Default for SqlConfig {
    fn default() -> Self {
        Self {
            table: "wells".to_string(),
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config parse error ({}): {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("Config serialization error: {0}")]
    Serialize(#[source] toml::ser::Error),

    #[error("Config validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ImportConfig::default();
        assert_eq!(config.batch.max_rows, 1000);
        assert_eq!(config.output.directory, PathBuf::from("./sql-imports"));
        assert_eq!(config.sql.table, "wells");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_batch_file_name_is_zero_padded() {
        let output = OutputConfig::default();
        assert_eq!(output.batch_file_name(1), "wells_import_0001.sql");
        assert_eq!(output.batch_file_name(42), "wells_import_0042.sql");

        let narrow = OutputConfig {
            sequence_width: 2,
            file_prefix: "b".to_string(),
            ..OutputConfig::default()
        };
        assert_eq!(narrow.batch_file_name(7), "b07.sql");
    }

    #[test]
    fn test_lexicographic_order_matches_numeric() {
        let output = OutputConfig::default();
        let mut names: Vec<String> = (1..=120).map(|n| output.batch_file_name(n)).collect();
        let numeric = names.clone();
        names.sort();
        assert_eq!(names, numeric);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ImportConfig::from_toml_str(
            r#"
[batch]
max_rows = 250
"#,
        )
        .unwrap();
        assert_eq!(config.batch.max_rows, 250);
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let err = ImportConfig::from_toml_str("[batch]\nmax_rows = 0\n").unwrap_err();
        match err {
            ConfigError::Validation(errors) => {
                assert!(errors.iter().any(|e| e.contains("max_rows")));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_table_name_rejected() {
        let mut config = ImportConfig::default();
        config.sql.table = "wells; DROP TABLE wells".to_string();
        assert!(config.validate().is_err());

        config.sql.table = "2wells".to_string();
        assert!(config.validate().is_err());

        config.sql.table = "well_records_v2".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_prefix_with_separator_rejected() {
        let mut config = ImportConfig::default();
        config.output.file_prefix = "../escape".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = ImportConfig::default();
        let text = config.to_toml().unwrap();
        let parsed = ImportConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let mut config = ImportConfig::from_toml_str(
            "[batch]\nmax_rows = 10\n[sql]\ntable = \"from_file\"\n",
        )
        .unwrap();
        config
            .apply_overrides(&ConfigOverrides {
                output_dir: Some(PathBuf::from("out")),
                batch_size: Some(250),
                table: Some("from_cli".to_string()),
            })
            .unwrap();

        assert_eq!(config.output.directory, PathBuf::from("out"));
        assert_eq!(config.batch.max_rows, 250);
        assert_eq!(config.sql.table, "from_cli");
        assert_eq!(config.output.file_prefix, "wells_import_");
    }

    #[test]
    fn test_empty_overrides_keep_config() {
        let mut config = ImportConfig::default();
        config.apply_overrides(&ConfigOverrides::default()).unwrap();
        assert_eq!(config, ImportConfig::default());
    }

    #[test]
    fn test_overrides_are_validated() {
        let mut config = ImportConfig::default();
        let err = config
            .apply_overrides(&ConfigOverrides {
                batch_size: Some(0),
                table: Some("wells; DROP TABLE wells".to_string()),
                ..ConfigOverrides::default()
            })
            .unwrap_err();
        match err {
            ConfigError::Validation(errors) => {
                assert_eq!(errors.len(), 2, "{errors:?}");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = ImportConfig::load_from_file(Path::new("/nonexistent/import_config.toml"));
        assert!(matches!(err, Err(ConfigError::Io(_, _))));
    }
}
