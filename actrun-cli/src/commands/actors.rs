//! Actor command handlers
//!
//! Browsing, searching and inspecting actors, including a summary of the
//! input form derived from an actor's declared schema.

use anyhow::Result;
use clap::Subcommand;
use colored::*;

use actrun_client::GatewayClient;
use actrun_core::domain::actor::ActorSummary;
use actrun_core::schema::{FieldKind, InputSchema, build_form};

use crate::commands::authed_client;
use crate::config::Config;
use crate::render::truncate;

/// Actor subcommands
#[derive(Subcommand)]
pub enum ActorsCommands {
    /// List actors (public store by default)
    List {
        /// List your own actors instead of the public store
        #[arg(long)]
        mine: bool,

        /// Free-text search filter (public store only)
        #[arg(long)]
        search: Option<String>,

        /// Category filter (public store only)
        #[arg(long)]
        category: Option<String>,

        /// Maximum entries to fetch (capped by the gateway at 100)
        #[arg(long)]
        limit: Option<u32>,
    },
    /// List store categories
    Categories,
    /// Show one actor, including its input form
    Show {
        /// Actor ID
        id: String,
    },
}

/// Handle actor commands
pub async fn handle_actors_command(command: ActorsCommands, config: &Config) -> Result<()> {
    match command {
        ActorsCommands::List {
            mine,
            search,
            category,
            limit,
        } => list_actors(config, mine, search, category, limit).await,
        ActorsCommands::Categories => list_categories(config).await,
        ActorsCommands::Show { id } => show_actor(config, &id).await,
    }
}

async fn list_actors(
    config: &Config,
    mine: bool,
    search: Option<String>,
    category: Option<String>,
    limit: Option<u32>,
) -> Result<()> {
    let client = authed_client(config)?;

    let actors = if mine {
        client.my_actors().await?
    } else {
        client
            .public_actors(search.as_deref(), category.as_deref(), limit)
            .await?
    };

    if actors.is_empty() {
        println!("{}", "No actors found.".yellow());
    } else {
        println!("{}", format!("Found {} actor(s):", actors.len()).bold());
        println!();
        for actor in actors {
            print_actor_summary(&actor);
        }
    }

    Ok(())
}

async fn list_categories(config: &Config) -> Result<()> {
    // The category list is static on the gateway and needs no credential.
    let client = GatewayClient::new(&config.gateway_url);
    let categories = client.categories().await?;

    println!("{}", "Categories:".bold());
    for category in categories {
        println!("  {} {}", category.id.cyan(), category.title.dimmed());
    }

    Ok(())
}

async fn show_actor(config: &Config, id: &str) -> Result<()> {
    let client = authed_client(config)?;
    let actor = client.get_actor(id).await?;

    println!("{}", "Actor Details:".bold());
    println!("  ID:    {}", actor.id.cyan());
    println!("  Name:  {}", actor.name);
    println!("  Title: {}", actor.title);
    if let Some(description) = &actor.description {
        println!("  About: {}", truncate(description, 200));
    }

    match InputSchema::from_value(actor.input_schema.as_ref()) {
        Some(schema) => {
            let form = build_form(&schema, &actor.default_run_input);
            println!("\n{}", "Input form:".bold());
            for field in &form.fields {
                let required = if field.required { " *".red().to_string() } else { String::new() };
                println!(
                    "  {}{} {}",
                    field.name.cyan(),
                    required,
                    format!("({})", field.kind.label()).dimmed()
                );
                if let FieldKind::Enum(options) = &field.kind {
                    println!("      one of: {}", options.join(", ").dimmed());
                }
                if let Some(description) = &field.description {
                    println!("      {}", truncate(description, 120).dimmed());
                }
                if let Some(default) = &field.default {
                    println!("      default: {}", default.to_string().dimmed());
                }
            }
        }
        None => {
            println!(
                "\n{}",
                "This actor declares no input schema; pass raw JSON with 'run start --input'."
                    .yellow()
            );
        }
    }

    Ok(())
}

/// Print an actor summary line
fn print_actor_summary(actor: &ActorSummary) {
    println!("  {} {}", "▸".cyan(), actor.title.bold());
    println!("    ID: {}", actor.id.dimmed());
    if let Some(username) = &actor.username {
        println!("    By: {}", username.dimmed());
    }
    if let Some(description) = &actor.description {
        println!("    {}", truncate(description, 120).dimmed());
    }

    let mut tags: Vec<String> = Vec::new();
    tags.push(if actor.is_public { "Public".to_string() } else { "Private".to_string() });
    if actor.featured == Some(true) {
        tags.push("Featured".to_string());
    }
    if let Some(category) = &actor.category {
        tags.push(category.clone());
    }
    println!("    [{}]", tags.join("] [").dimmed());
    println!();
}
