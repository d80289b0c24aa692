//! Actrun CLI
//!
//! Terminal front end for the actrun gateway: validate and cache an API
//! key, browse actors, configure their input, trigger runs and watch them
//! to completion.

mod commands;
mod config;
mod render;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;

#[derive(Parser)]
#[command(name = "actrun")]
#[command(about = "Browse and run hosted actors from the terminal", long_about = None)]
struct Cli {
    /// Gateway URL
    #[arg(
        long,
        env = "ACTRUN_GATEWAY_URL",
        default_value = "http://localhost:3000"
    )]
    gateway_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config {
        gateway_url: cli.gateway_url,
    };

    handle_command(cli.command, &config).await
}
