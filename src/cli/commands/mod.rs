//! Command implementations for the disaster decoder CLI
//!
//! Each command family lives in its own module:
//! - `decode`: single identifiers, validation, geo-codes and extraction
//! - `batch`: identifier lists, file-name scans and sheet exports
//! - `tables`: code table listing

pub mod batch;
pub mod decode;
pub mod shared;
pub mod tables;

use crate::cli::args::{Args, Commands};
use anyhow::Result;
use shared::{load_config, setup_logging};
use tracing::debug;

/// Main command runner
pub async fn run(args: Args) -> Result<()> {
    setup_logging(&args)?;
    let config = load_config(&args)?;
    let format = args.format;

    let Some(command) = args.command else {
        return Ok(());
    };
    debug!("Running command: {:?}", command);

    match command {
        Commands::Decode(decode_args) => decode::run_decode(&decode_args, &config, format),
        Commands::Validate(validate_args) => decode::run_validate(&validate_args, format),
        Commands::Geo(geo_args) => decode::run_geo(&geo_args, format),
        Commands::Extract(extract_args) => decode::run_extract(&extract_args, format),
        Commands::Batch(batch_args) => batch::run_batch(&batch_args, &config, format).await,
        Commands::Files(files_args) => batch::run_files(&files_args, &config, format).await,
        Commands::Sheet(sheet_args) => batch::run_sheet(&sheet_args, &config, format),
        Commands::Tables => tables::run_tables(config.language, format),
    }
}
