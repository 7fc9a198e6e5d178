
use crate::Cli;

use clap::Parser;
use tempfile::TempDir;

/// Parses `args` with `--config-dir` pointing at `dir`.
pub(crate) fn parse(dir: &TempDir, args: &[&str]) -> Cli {
    let config_dir = dir.path().to_str().unwrap();
    let mut argv = vec!["acct", "--config-dir", config_dir];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}
