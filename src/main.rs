use clap::Parser;
use disaster_decoder::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        tokio::select! {
            result = commands::run(args) => result,
            _ = tokio::signal::ctrl_c() => {
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(anyhow::anyhow!("Interrupted by user"))
            }
        }
    });

    if let Err(error) = result {
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Disaster Decoder - composite disaster-information identifier decoder");
    println!("====================================================================");
    println!();
    println!("Decode 36-digit disaster identifiers and 12-digit administrative geo-codes.");
    println!();
    println!("USAGE:");
    println!("    disaster_decoder <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    decode      Decode a single identifier");
    println!("    validate    Check identifiers without decoding them");
    println!("    geo         Decompose a 12-digit geo-code");
    println!("    extract     Find an identifier inside arbitrary text");
    println!("    batch       Decode a list of identifiers");
    println!("    files       Decode identifiers embedded in file names");
    println!("    sheet       Decode the identifier column of a CSV export");
    println!("    tables      Print all code tables");
    println!();
    println!("OPTIONS:");
    println!("    --config <PATH>      Configuration file (JSON)");
    println!("    -l, --language <LANG>  Label language: zh (default) or en");
    println!("    --format <FORMAT>    Output format: text (default) or json");
    println!("    -v, --verbose        Increase logging verbosity");
    println!("    -q, --quiet          Only log warnings and errors");
    println!();
    println!("EXAMPLES:");
    println!("    disaster_decoder decode 110105000000202401151030000011301001");
    println!("    disaster_decoder --language en geo 110105003001");
    println!("    disaster_decoder batch --file ids.txt --format json");
    println!("    disaster_decoder files ./uploads --pattern '*.jpg' --recursive");
    println!("    disaster_decoder sheet report.csv --description-column 2");
    println!();
    println!("For detailed help on any command, use:");
    println!("    disaster_decoder <COMMAND> --help");
}
