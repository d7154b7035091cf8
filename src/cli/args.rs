//! Command-line argument definitions for the disaster identifier decoder
//!
//! This module defines the CLI interface using the clap derive API.

use crate::codes::Language;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the disaster identifier decoder
///
/// Decodes 36-digit composite disaster-information identifiers and 12-digit
/// administrative geo-codes, singly or in batches.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "disaster_decoder",
    version,
    about = "Decode 36-digit composite disaster-information identifiers",
    long_about = "Decodes the 36-digit composite identifiers attached to disaster-information \
                  records into geographic location, event time, reporting source, media carrier \
                  and a three-level disaster classification. Identifiers can be decoded directly \
                  or extracted from file names, CSV sheet exports and free text."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file (JSON)
    ///
    /// Defaults to <config_dir>/disaster-decoder/config.json when that file exists.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Label language for resolved names (zh or en)
    #[arg(
        long = "language",
        short = 'l',
        value_enum,
        ignore_case = true,
        value_name = "LANG",
        global = true
    )]
    pub language: Option<Language>,

    /// Output format for results
    #[arg(
        long = "format",
        value_enum,
        default_value = "text",
        global = true,
        help = "Output format for results"
    )]
    pub format: OutputFormat,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v: debug, -vv: trace)"
    )]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress informational logging",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Decode a single 36-digit identifier
    Decode(DecodeArgs),
    /// Check identifiers without decoding them
    Validate(ValidateArgs),
    /// Decompose a 12-digit geo-code
    Geo(GeoArgs),
    /// Find a 36-digit identifier inside arbitrary text
    Extract(ExtractArgs),
    /// Decode a list of identifiers
    Batch(BatchArgs),
    /// Decode the identifiers embedded in file names under a directory
    Files(FilesArgs),
    /// Decode the identifier column of a CSV sheet export
    Sheet(SheetArgs),
    /// Print all code tables
    Tables,
}

#[derive(Debug, Clone, Parser)]
pub struct DecodeArgs {
    /// The 36-digit identifier
    #[arg(value_name = "ID")]
    pub id: String,
}

#[derive(Debug, Clone, Parser)]
pub struct ValidateArgs {
    /// Identifiers to check
    #[arg(value_name = "ID", required = true)]
    pub ids: Vec<String>,
}

#[derive(Debug, Clone, Parser)]
pub struct GeoArgs {
    /// The 12-digit administrative code
    #[arg(value_name = "CODE")]
    pub code: String,
}

#[derive(Debug, Clone, Parser)]
pub struct ExtractArgs {
    /// Text that may contain an identifier
    #[arg(value_name = "TEXT")]
    pub text: String,
}

#[derive(Debug, Clone, Parser)]
pub struct BatchArgs {
    /// File with one identifier per line
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Identifiers given on the command line
    #[arg(value_name = "ID")]
    pub ids: Vec<String>,
}

#[derive(Debug, Clone, Parser)]
pub struct FilesArgs {
    /// Directory to scan
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Only consider file names matching this glob (e.g. "*.jpg")
    #[arg(short = 'p', long = "pattern", value_name = "GLOB")]
    pub pattern: Option<String>,

    /// Descend into subdirectories
    #[arg(short = 'r', long = "recursive")]
    pub recursive: bool,
}

#[derive(Debug, Clone, Parser)]
pub struct SheetArgs {
    /// CSV export of the sheet
    #[arg(value_name = "CSV")]
    pub path: PathBuf,

    /// Identifier column (0-based); detected when omitted
    #[arg(long = "id-column", value_name = "N")]
    pub id_column: Option<usize>,

    /// Description column (0-based)
    #[arg(long = "description-column", value_name = "N")]
    pub description_column: Option<usize>,

    /// First row to decode (1-based, inclusive)
    #[arg(long = "start-row", value_name = "N")]
    pub start_row: Option<usize>,

    /// Last row to decode (1-based, inclusive)
    #[arg(long = "end-row", value_name = "N")]
    pub end_row: Option<usize>,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, colored output
    Text,
    /// JSON for scripting
    Json,
}

impl Args {
    /// Log level for the tracing filter
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "warn"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decode_with_global_flags() {
        let args = Args::try_parse_from([
            "disaster_decoder",
            "decode",
            "110105000000202401151030000011301001",
            "--language",
            "en",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(args.language, Some(Language::En));
        assert_eq!(args.format, OutputFormat::Json);
        assert!(matches!(args.command, Some(Commands::Decode(ref d)) if d.id.len() == 36));
    }

    #[test]
    fn test_log_levels() {
        let args = Args::try_parse_from(["disaster_decoder", "tables"]).unwrap();
        assert_eq!(args.get_log_level(), "info");

        let args = Args::try_parse_from(["disaster_decoder", "-vv", "tables"]).unwrap();
        assert_eq!(args.get_log_level(), "trace");

        let args = Args::try_parse_from(["disaster_decoder", "tables", "-q"]).unwrap();
        assert_eq!(args.get_log_level(), "warn");

        assert!(Args::try_parse_from(["disaster_decoder", "-q", "-v", "tables"]).is_err());
    }

    #[test]
    fn test_parse_sheet_options() {
        let args = Args::try_parse_from([
            "disaster_decoder",
            "sheet",
            "report.csv",
            "--id-column",
            "2",
            "--start-row",
            "3",
        ])
        .unwrap();

        match args.command {
            Some(Commands::Sheet(sheet)) => {
                assert_eq!(sheet.id_column, Some(2));
                assert_eq!(sheet.start_row, Some(3));
                assert_eq!(sheet.end_row, None);
            }
            other => panic!("Expected sheet command, got {:?}", other),
        }
    }

    #[test]
    fn test_program_name_matches_binary() {
        use clap::CommandFactory;
        assert_eq!(Args::command().get_name(), env!("CARGO_PKG_NAME"));
    }

    #[test]
    fn test_validate_requires_an_identifier() {
        assert!(Args::try_parse_from(["disaster_decoder", "validate"]).is_err());
    }

    #[test]
    fn test_language_aliases() {
        let args = Args::try_parse_from(["disaster_decoder", "-l", "EN", "tables"]).unwrap();
        assert_eq!(args.language, Some(Language::En));

        let args = Args::try_parse_from(["disaster_decoder", "--language", "chinese", "tables"]).unwrap();
        assert_eq!(args.language, Some(Language::Zh));
    }

    #[test]
    fn test_unknown_language_is_rejected() {
        assert!(Args::try_parse_from(["disaster_decoder", "--language", "fr", "tables"]).is_err());
    }
}
