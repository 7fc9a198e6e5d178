use crate::cli::Cli;
use crate::error::Result as CliResult;

use std::sync::Arc;

use acct_config::Config;
use acct_session::{
    LoadReport, Plan, SessionApi, SessionHandle, SessionProvider, SessionSnapshot, SessionStore,
    use_session,
};
use clap::Subcommand;
use log::{info, warn};

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Register a local user, replacing any current one
    Register {
        /// Display name
        #[arg(long)]
        name: String,

        /// Email address (not validated)
        #[arg(long)]
        email: String,

        /// Accepted for compatibility; never stored
        #[arg(long)]
        password: String,
    },

    /// Log out and delete the saved session
    Logout,

    /// Change the current user's plan (free, plus, enterprise)
    Plan { plan: Plan },

    /// Show the current session
    Whoami,
}

/// Loads and validates config, honoring `--config-dir`.
pub fn load_config(cli: &Cli) -> CliResult<Config> {
    let config = match &cli.config_dir {
        Some(dir) => Config::load_from(dir)?,
        None => Config::load()?,
    };
    config.validate()?;
    Ok(config)
}

/// Opens the file-backed store and runs one command against it.
pub fn execute(config: &Config, command: &Commands) -> CliResult<SessionSnapshot> {
    let store = SessionStore::open_from_config(config)?;

    if let LoadReport::Discarded { message, backup } = store.load_report() {
        warn!(
            "Saved session was unreadable ({message}); backup: {}",
            backup.as_deref().unwrap_or("none")
        );
    }

    let handle: SessionHandle = Arc::new(store);
    SessionProvider::new(handle).scope(|| dispatch(command))
}

fn dispatch(command: &Commands) -> CliResult<SessionSnapshot> {
    let session = use_session();

    match command {
        Commands::Register {
            name,
            email,
            password,
        } => {
            let user = session.register(name, email, password)?;
            info!("Registered {} <{}>", user.name, user.email);
        }
        Commands::Logout => session.logout()?,
        Commands::Plan { plan } => {
            if session.update_plan(*plan)?.is_none() {
                warn!("No user registered; plan left unchanged");
            }
        }
        Commands::Whoami => {}
    }

    Ok(session.snapshot())
}
