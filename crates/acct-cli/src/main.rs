//! acct - local account session CLI
//!
//! # Examples
//!
//! ```bash
//! # Create a local user
//! acct register --name Ana --email ana@example.com --password secret
//!
//! # Upgrade
//! acct plan plus --pretty
//!
//! # Forget the user
//! acct logout
//! ```

use acct_cli::{Cli, CliError, execute, load_config, logger};

use std::process::ExitCode;

use clap::Parser;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!();
            eprintln!("Hint: {}", e.recovery_hint());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<String, CliError> {
    let config = load_config(cli)?;

    logger::initialize(
        config.logging.level,
        config.log_file_path(),
        config.logging.colored,
    )?;
    config.log_summary();

    let snapshot = execute(&config, &cli.command)?;

    let output = if cli.pretty {
        serde_json::to_string_pretty(&snapshot)
    } else {
        serde_json::to_string(&snapshot)
    };
    output.map_err(CliError::from_json)
}
