use crate::commands::Commands;

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "acct")]
#[command(about = "Local account session manager")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config directory (defaults to ACCT_CONFIG_DIR, then ~/.acct)
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,
}
