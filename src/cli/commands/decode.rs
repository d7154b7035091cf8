//! Single-item commands: decode, validate, geo and extract

use super::shared::{print_decoded, print_json};
use crate::cli::args::{DecodeArgs, ExtractArgs, GeoArgs, OutputFormat, ValidateArgs};
use crate::config::DecoderConfig;
use crate::decoder::IdDecoder;
use crate::extract::extract_id;
use crate::geo::parse_geo_code;
use crate::identifier::check_identifier;
use anyhow::{Result, bail};
use colored::*;
use serde_json::json;
use tracing::info;

pub fn run_decode(args: &DecodeArgs, config: &DecoderConfig, format: OutputFormat) -> Result<()> {
    let decoded = IdDecoder::new(config.language).decode(&args.id)?;

    match format {
        OutputFormat::Json => print_json(&decoded)?,
        OutputFormat::Text => print_decoded(&decoded),
    }
    Ok(())
}

/// Fails when any identifier is invalid, after reporting all of them
pub fn run_validate(args: &ValidateArgs, format: OutputFormat) -> Result<()> {
    let results: Vec<_> = args
        .ids
        .iter()
        .map(|id| (id.as_str(), check_identifier(id)))
        .collect();

    match format {
        OutputFormat::Json => {
            let report: Vec<_> = results
                .iter()
                .map(|(id, result)| {
                    json!({
                        "id": id,
                        "valid": result.is_ok(),
                        "reason": result.as_ref().err().map(|v| v.to_string()),
                    })
                })
                .collect();
            print_json(&report)?;
        }
        OutputFormat::Text => {
            for (id, result) in &results {
                match result {
                    Ok(_) => println!("{} {}", "valid".bright_green().bold(), id),
                    Err(violation) => {
                        println!("{} {}: {}", "invalid".bright_red().bold(), id, violation)
                    }
                }
            }
        }
    }

    let invalid = results.iter().filter(|(_, r)| r.is_err()).count();
    info!("Validated {} identifiers, {} invalid", results.len(), invalid);
    if invalid > 0 {
        bail!("{} of {} identifiers are invalid", invalid, results.len());
    }
    Ok(())
}

pub fn run_geo(args: &GeoArgs, format: OutputFormat) -> Result<()> {
    let geo = parse_geo_code(&args.code)?;

    match format {
        OutputFormat::Json => print_json(&json!({
            "decomposition": geo,
            "granularity": geo.granularity(),
        }))?,
        OutputFormat::Text => {
            let label = |name: &str| format!("  {:<12}", name).bright_cyan();
            println!(
                "{} {} ({} level)",
                "Geo code".bright_green().bold(),
                geo.geo_code.bright_white().bold(),
                geo.granularity()
            );
            println!("{}{}", label("Province:"), geo.province_code);
            println!("{}{}", label("City:"), geo.city_code);
            println!("{}{}", label("District:"), geo.district_code);
            println!("{}{}", label("Township:"), geo.township_code);
            println!("{}{}", label("Village:"), geo.village_code);
            println!("\n{}", "Roll-up codes".bright_green().bold());
            for (level, code) in geo.rollups() {
                println!("{}{}", label(&format!("{}:", level)), code);
            }
        }
    }
    Ok(())
}

pub fn run_extract(args: &ExtractArgs, format: OutputFormat) -> Result<()> {
    let id = extract_id(&args.text);

    match format {
        OutputFormat::Json => print_json(&json!({ "text": args.text, "id": id }))?,
        OutputFormat::Text => match id {
            Some(id) => println!("{}", id),
            None => println!("{}", "No 36-digit identifier found".bright_yellow()),
        },
    }
    Ok(())
}
