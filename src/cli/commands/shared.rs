//! Shared components for CLI commands
//!
//! Logging setup, configuration layering and the output helpers used by
//! every subcommand.

use crate::batch::{BatchOutcome, ItemOutcome};
use crate::cli::args::{Args, OutputFormat};
use crate::config::DecoderConfig;
use crate::models::DecodedIdentifier;
use anyhow::{Context, Result};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Set up structured logging on stderr
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("disaster_decoder={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using the layered approach (file -> env -> args)
pub fn load_config(args: &Args) -> Result<DecoderConfig> {
    let mut config =
        DecoderConfig::load(args.config.as_deref()).context("Failed to load configuration")?;

    if let Some(language) = args.language {
        config = config.with_language(language);
    }

    debug!("Effective configuration: {:?}", config);
    Ok(config)
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

/// Spinner for work with no meaningful item count
pub fn create_spinner(message: &str, format: OutputFormat) -> ProgressBar {
    if format == OutputFormat::Json {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Multi-line text rendering of a decoded identifier
pub fn print_decoded(decoded: &DecodedIdentifier) {
    let label = |name: &str| format!("  {:<20}", name).bright_cyan();

    println!("{} {}", "Identifier".bright_green().bold(), decoded.original_id.bright_white().bold());

    let granularity = decoded
        .geo()
        .map(|geo| format!(" ({} level)", geo.granularity()))
        .unwrap_or_default();
    println!("{}{}{}", label("Geo code:"), decoded.geo_code, granularity);
    println!(
        "{}{}",
        label("Event time:"),
        decoded.event_timestamp.format("%Y-%m-%d %H:%M:%S")
    );
    println!(
        "{}{} / {} ({}/{})",
        label("Source:"),
        decoded.source_category_name,
        decoded.source_subcategory_name,
        decoded.source_category_code,
        decoded.source_subcategory_code
    );
    println!("{}{} ({})", label("Carrier:"), decoded.carrier_name, decoded.carrier_code);
    println!(
        "{}{} ({})",
        label("Disaster category:"),
        decoded.disaster_category_name,
        decoded.disaster_category_code
    );
    println!(
        "{}{} ({})",
        label("Sub-category:"),
        decoded.disaster_subcategory_name,
        decoded.disaster_subcategory_code
    );
    println!(
        "{}{} ({})",
        label("Indicator:"),
        decoded.disaster_indicator_name,
        decoded.disaster_indicator_code
    );
    println!("{}{}", label("Description:"), decoded.description);

    for unknown in &decoded.unknown_codes {
        println!(
            "  {} no table entry for {} code '{}'",
            "warning:".bright_yellow().bold(),
            unknown.field,
            unknown.code
        );
    }
}

/// Colored summary line for a batch
pub fn print_batch_summary<T>(title: &str, outcome: &BatchOutcome<T>) {
    println!("\n{}", title.bright_green().bold());
    println!(
        "  {} {}  {} {}  {} {}  ({:.1}%)",
        "Total:".bright_cyan(),
        outcome.total.to_string().bright_white().bold(),
        "Succeeded:".bright_cyan(),
        outcome.succeeded.to_string().bright_green().bold(),
        "Failed:".bright_cyan(),
        if outcome.failed > 0 {
            outcome.failed.to_string().bright_red().bold()
        } else {
            outcome.failed.to_string().bright_white().bold()
        },
        outcome.success_rate()
    );
}

/// One line per failed item
pub fn print_failures<T>(outcome: &BatchOutcome<T>) {
    let failures: Vec<&ItemOutcome<T>> = outcome.failures().collect();
    if failures.is_empty() {
        return;
    }

    println!("\n{}", "Failures".bright_red().bold());
    for item in failures {
        println!(
            "  #{:<4} {} {}",
            item.index + 1,
            format!("'{}'", item.input).bright_white(),
            item.error.as_deref().unwrap_or_default().red()
        );
    }
}
