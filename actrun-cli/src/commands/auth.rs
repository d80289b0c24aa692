//! Auth command handlers
//!
//! Validates the API key against the gateway and caches it locally, so the
//! other commands can pick it up without asking again.

use std::io::{BufRead, Write};

use anyhow::Result;
use clap::Subcommand;
use colored::*;

use actrun_client::GatewayClient;
use actrun_core::domain::user::UserAccount;

use crate::config::{self, Config};

/// Auth subcommands
#[derive(Subcommand)]
pub enum AuthCommands {
    /// Validate an API key and cache it
    Login {
        /// API key; prompted for when omitted
        #[arg(long)]
        key: Option<String>,
    },
    /// Re-validate the cached API key
    Status,
    /// Forget the cached API key
    Logout,
}

/// Handle auth commands
pub async fn handle_auth_command(command: AuthCommands, config: &Config) -> Result<()> {
    match command {
        AuthCommands::Login { key } => login(config, key).await,
        AuthCommands::Status => status(config).await,
        AuthCommands::Logout => logout(),
    }
}

async fn login(config: &Config, key: Option<String>) -> Result<()> {
    let api_key = match key {
        Some(key) => key,
        None => prompt_for_key()?,
    };

    let api_key = api_key.trim().to_string();
    if api_key.is_empty() {
        anyhow::bail!("API key cannot be empty");
    }

    let client = GatewayClient::new(&config.gateway_url);

    println!("{}", "Validating API key...".dimmed());
    match client.validate_key(&api_key).await {
        Ok(response) => {
            config::save_api_key(&api_key)?;
            println!(
                "{} Welcome, {}",
                "✓ Connected successfully!".green(),
                response.user.username.bold()
            );
            print_account(&response.user);
            Ok(())
        }
        Err(e) => {
            println!("{} {}", "✗".red(), e.to_string().red());
            anyhow::bail!("login failed")
        }
    }
}

async fn status(config: &Config) -> Result<()> {
    let Some(api_key) = config::load_api_key() else {
        println!("{}", "Not logged in.".yellow());
        return Ok(());
    };

    let client = GatewayClient::new(&config.gateway_url);
    match client.validate_key(&api_key).await {
        Ok(response) => {
            println!("{}", "Logged in.".green());
            print_account(&response.user);
        }
        Err(e) => {
            println!("{}", "Cached API key is no longer valid.".yellow());
            println!("  {}", e.to_string().dimmed());
        }
    }

    Ok(())
}

fn logout() -> Result<()> {
    if config::clear_api_key()? {
        println!("{}", "Logged out successfully.".green());
    } else {
        println!("{}", "No cached API key.".yellow());
    }
    Ok(())
}

fn prompt_for_key() -> Result<String> {
    print!("Enter your API key: ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}

fn print_account(user: &UserAccount) {
    println!("  Username: {}", user.username.cyan());
    if let Some(email) = &user.email {
        println!("  Email:    {}", email);
    }
    if let Some(plan) = &user.plan {
        let plan = plan.as_str().map(str::to_string).unwrap_or_else(|| plan.to_string());
        println!("  Plan:     {}", plan);
    }
}
