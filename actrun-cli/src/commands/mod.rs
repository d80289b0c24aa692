//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod actors;
mod auth;
mod run;

pub use actors::ActorsCommands;
pub use auth::AuthCommands;
pub use run::RunCommands;

use anyhow::Result;
use clap::Subcommand;

use actrun_client::GatewayClient;

use crate::config::{self, Config};

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Credential management
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Browse available actors
    Actors {
        #[command(subcommand)]
        command: ActorsCommands,
    },
    /// Start and follow actor runs
    Run {
        #[command(subcommand)]
        command: RunCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Auth { command } => auth::handle_auth_command(command, config).await,
        Commands::Actors { command } => actors::handle_actors_command(command, config).await,
        Commands::Run { command } => run::handle_run_command(command, config).await,
    }
}

/// Builds a gateway client carrying the cached credential.
///
/// Fails with a pointer to `auth login` when no key is cached.
pub(crate) fn authed_client(config: &Config) -> Result<GatewayClient> {
    let api_key = config::load_api_key()
        .ok_or_else(|| anyhow::anyhow!("No API key configured. Run 'actrun auth login' first."))?;

    Ok(GatewayClient::new(&config.gateway_url).with_api_key(api_key))
}
