//! acct-cli library
//!
//! Exposes command execution so it can be driven from tests without the
//! process-global logger.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;

#[cfg(test)]
mod tests;

pub use cli::Cli;
pub use commands::{Commands, execute, load_config};
pub use error::{CliError, Result as CliResult};
