//! wells-import - CSV/JSON to SQL batch importer
//!
//! Converts a wells CSV or JSON file into numbered, transaction-wrapped
//! SQL scripts for bulk-loading the wells table.
//!
//! # Usage
//!
//! ```bash
//! # Import into ./sql-imports (default)
//! wells-import wells.csv
//!
//! # Import into a specific directory with 500-row batches
//! wells-import wells.json out/ --batch-size 500
//!
//! # Write example-wells.csv / example-wells.json
//! wells-import --example
//!
//! # Validate only, write nothing
//! wells-import wells.csv --dry-run
//! ```
//!
//! # Environment Variables
//!
//! - `WELLS_IMPORT_CONFIG`: Path to an import config TOML file
//! - `RUST_LOG`: Logging level (default: info)
//!
//! Logs go to stderr; the end-of-run summary goes to stdout. The exit
//! status is non-zero only for fatal errors, never for rejected rows.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use wells_import::{
    sample, ConfigOverrides, DirectorySink, DiscardSink, ImportConfig, ImportPipeline,
    RecordSource,
};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "wells-import")]
#[command(about = "Convert wells CSV/JSON into batched SQL import scripts")]
#[command(version)]
struct CliArgs {
    /// Input file (.csv or .json)
    #[arg(required_unless_present_any = ["example", "print_config"])]
    input: Option<PathBuf>,

    /// Output directory for batch files (default: ./sql-imports)
    output_dir: Option<PathBuf>,

    /// Write example-wells.csv and example-wells.json instead of importing
    #[arg(long)]
    example: bool,

    /// Directory --example writes into
    #[arg(long, value_name = "DIR", default_value = ".")]
    example_dir: PathBuf,

    /// Maximum INSERT statements per batch file
    #[arg(long, value_name = "N")]
    batch_size: Option<usize>,

    /// Target table name
    #[arg(long, value_name = "NAME")]
    table: Option<String>,

    /// Import config TOML (otherwise $WELLS_IMPORT_CONFIG, then ./import_config.toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Validate and render, but write no batch files
    #[arg(long)]
    dry_run: bool,

    /// Print the effective config as TOML and exit
    #[arg(long)]
    print_config: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

// ============================================================================
// Setup
// ============================================================================

fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Load config from the search order, then apply command-line overrides.
fn resolve_config(args: &CliArgs) -> Result<ImportConfig> {
    let mut config = match &args.config {
        Some(path) => ImportConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ImportConfig::load(),
    };

    let overrides = ConfigOverrides {
        output_dir: args.output_dir.clone(),
        batch_size: args.batch_size,
        table: args.table.clone(),
    };
    config
        .apply_overrides(&overrides)
        .context("Invalid command-line overrides")?;
    Ok(config)
}

// ============================================================================
// Main
// ============================================================================

fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(args.log_json);

    if args.example {
        let (csv_path, json_path) = sample::write_examples(&args.example_dir)
            .context("Failed to write example files")?;
        println!("Wrote {}", csv_path.display());
        println!("Wrote {}", json_path.display());
        return Ok(());
    }

    let config = resolve_config(&args)?;

    if args.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let input = args
        .input
        .as_deref()
        .context("An input file is required")?;

    // Open the input before touching the output directory so a bad path
    // leaves no trace.
    let source = RecordSource::open(input)?;
    let pipeline = ImportPipeline::new(config);

    let summary = if args.dry_run {
        info!("Dry run: no batch files will be written");
        pipeline.run(source, &mut DiscardSink)?
    } else {
        let out_dir = &pipeline.config().output.directory;
        let mut sink = DirectorySink::create(out_dir)?;
        info!(dir = %out_dir.display(), "Writing batch files");
        pipeline.run(source, &mut sink)?
    };

    println!("{summary}");
    if !args.dry_run && summary.batches_written() > 0 {
        println!("  Output dir:  {}", pipeline.config().output.directory.display());
    }

    Ok(())
}
