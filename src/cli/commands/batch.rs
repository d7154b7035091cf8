//! Batch commands: identifier lists, file-name scans and sheet exports

use super::shared::{create_spinner, print_batch_summary, print_failures, print_json};
use crate::batch::{BatchDecoder, Sheet, SheetOptions};
use crate::cli::args::{BatchArgs, FilesArgs, OutputFormat, SheetArgs};
use crate::cli::discovery::FileDiscovery;
use crate::config::DecoderConfig;
use anyhow::{Context, Result};
use colored::*;
use tracing::info;

/// Collect identifiers from the command line and an optional file
pub fn collect_ids(args: &BatchArgs) -> Result<Vec<String>> {
    let mut ids = args.ids.clone();

    if let Some(path) = &args.file {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read identifier list {}", path.display()))?;
        ids.extend(
            contents
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(str::to_string),
        );
    }

    Ok(ids)
}

pub async fn run_batch(args: &BatchArgs, config: &DecoderConfig, format: OutputFormat) -> Result<()> {
    let ids = collect_ids(args)?;
    info!("Decoding {} identifiers", ids.len());

    let batch = BatchDecoder::from_config(config.clone());
    let outcome = batch.decode_ids_concurrent(ids).await?;

    match format {
        OutputFormat::Json => print_json(&outcome)?,
        OutputFormat::Text => {
            for decoded in outcome.successes() {
                println!("{} {}", decoded.original_id.bright_white(), decoded.description);
            }
            print_failures(&outcome);
            print_batch_summary("Batch Summary", &outcome);
        }
    }
    Ok(())
}

pub async fn run_files(args: &FilesArgs, config: &DecoderConfig, format: OutputFormat) -> Result<()> {
    let mut discovery = FileDiscovery::new(args.dir.clone()).with_recursive(args.recursive);
    if let Some(pattern) = &args.pattern {
        discovery = discovery.with_pattern(pattern)?;
    }

    let pb = create_spinner("Scanning files", format);
    let batch = BatchDecoder::from_config(config.clone());

    let outcome = tokio::task::spawn_blocking(move || -> crate::Result<_> {
        let files = discovery.discover()?;
        info!("Found {} files", files.len());
        batch.decode_file_names(&files)
    })
    .await
    .context("File scan task failed")??;

    pb.finish_and_clear();

    match format {
        OutputFormat::Json => print_json(&outcome)?,
        OutputFormat::Text => {
            for item in outcome.items.iter().filter(|item| item.is_success()) {
                if let Some(decoded) = &item.value {
                    println!("{}\n    {}", item.input.bright_white(), decoded.description);
                }
            }
            print_failures(&outcome);
            print_batch_summary("File Scan Summary", &outcome);
        }
    }
    Ok(())
}

pub fn run_sheet(args: &SheetArgs, config: &DecoderConfig, format: OutputFormat) -> Result<()> {
    let sheet = Sheet::from_csv_path(&args.path)
        .with_context(|| format!("Failed to load sheet {}", args.path.display()))?;

    let options = SheetOptions {
        id_column: args.id_column,
        description_column: args.description_column,
        start_row: args.start_row,
        end_row: args.end_row,
    };

    let report = BatchDecoder::from_config(config.clone()).decode_sheet(&sheet, &options)?;

    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => {
            println!(
                "{} {} (ID column {}{}, rows {}-{})",
                "Sheet".bright_green().bold(),
                report.sheet.bright_white().bold(),
                report.id_column,
                if report.column_detected { ", detected" } else { "" },
                report.start_row,
                report.end_row
            );

            for item in &report.outcome.items {
                let row = report.row_number(item);
                match (&item.value, &item.error) {
                    (Some(decoded_row), _) => {
                        let note = decoded_row
                            .description
                            .as_deref()
                            .map(|d| format!(" [{}]", d))
                            .unwrap_or_default();
                        println!(
                            "  {} {}{}",
                            format!("Row {:<5}", row).bright_cyan(),
                            decoded_row.decoded.description,
                            note
                        );
                    }
                    (None, error) => println!(
                        "  {} {}",
                        format!("Row {:<5}", row).bright_cyan(),
                        error.as_deref().unwrap_or_default().red()
                    ),
                }
            }

            print_batch_summary("Sheet Summary", &report.outcome);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_collect_ids_merges_file_and_arguments() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "110105000000202401151030000011301001").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  12345  ").unwrap();

        let args = BatchArgs {
            file: Some(file.path().to_path_buf()),
            ids: vec!["440305000000202312312359590021401002".to_string()],
        };

        let ids = collect_ids(&args).unwrap();
        assert_eq!(ids.len(), 3);
        assert_eq!(ids[0], "440305000000202312312359590021401002");
        assert_eq!(ids[2], "  12345  ");
    }

    #[test]
    fn test_collect_ids_missing_file() {
        let args = BatchArgs {
            file: Some("/nonexistent/ids.txt".into()),
            ids: Vec::new(),
        };
        assert!(collect_ids(&args).is_err());
    }
}
