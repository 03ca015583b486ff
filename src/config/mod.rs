//! Import Configuration Module
//!
//! Batch size, output naming and target table, loaded from TOML.
//!
//! ## Loading Order
//!
//! 1. `--config <path>` on the command line
//! 2. `WELLS_IMPORT_CONFIG` environment variable (path to TOML file)
//! 3. `import_config.toml` in the current working directory
//! 4. Built-in defaults
//!
//! The loaded config is passed to the pipeline by value; there is no global
//! config instance, so every run (and every test) carries its own.

mod import_config;
pub mod validation;

pub use import_config::*;
