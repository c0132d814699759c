//! Main entry point for the sqlitediff CLI

use clap::Parser;
use sqlitediff::cli::Cli;
use sqlitediff::commands::execute_command;

fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging, honoring --verbose
    env_logger::Builder::from_default_env()
        .filter_level(cli.log_level())
        .init();

    // Execute the command
    if let Err(e) = execute_command(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
