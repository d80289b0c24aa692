//! Run command handlers
//!
//! Builds the input payload through the schema-derived form, triggers the
//! run, and follows it live through the run monitor until a terminal
//! status, rendering results on success.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use serde_json::Value;

use actrun_core::domain::actor::ActorDetail;
use actrun_core::domain::run::RunStatus;
use actrun_core::input::InputConfig;
use actrun_core::schema::{Form, InputSchema, build_form};
use actrun_monitor::{MonitorConfig, RunEvent, RunMonitor, RunWatch, StartError};

use crate::commands::authed_client;
use crate::config::Config;
use crate::render::{
    colorize_status, format_duration, preview_table, print_result_stats, status_message,
};

/// Run subcommands
#[derive(Subcommand)]
pub enum RunCommands {
    /// Start an actor run and watch it to completion
    Start {
        /// Actor ID
        actor_id: String,

        /// Set one input field, as name=value; repeatable
        #[arg(long = "set", value_name = "NAME=VALUE")]
        set: Vec<String>,

        /// Raw JSON input; replaces the defaults wholesale
        #[arg(long, conflicts_with = "input_file")]
        input: Option<String>,

        /// Read raw JSON input from a file
        #[arg(long)]
        input_file: Option<PathBuf>,

        /// Trigger the run and exit without polling
        #[arg(long)]
        no_watch: bool,

        /// Maximum result records to fetch on success
        #[arg(long)]
        results_limit: Option<u32>,

        /// Write the full results JSON to a file on success
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Check the status of a run
    Status {
        /// Run ID
        run_id: String,
    },
    /// Fetch and display the results of a run
    Results {
        /// Run ID
        run_id: String,

        /// Maximum records (capped by the gateway at 1000)
        #[arg(long)]
        limit: Option<u32>,

        /// Dataset format passed upstream
        #[arg(long)]
        format: Option<String>,

        /// Write the full results JSON to a file
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

/// Handle run commands
pub async fn handle_run_command(command: RunCommands, config: &Config) -> Result<()> {
    match command {
        RunCommands::Start {
            actor_id,
            set,
            input,
            input_file,
            no_watch,
            results_limit,
            output,
        } => {
            start_run(
                config,
                &actor_id,
                set,
                input,
                input_file,
                no_watch,
                results_limit,
                output,
            )
            .await
        }
        RunCommands::Status { run_id } => run_status(config, &run_id).await,
        RunCommands::Results {
            run_id,
            limit,
            format,
            output,
        } => run_results(config, &run_id, limit, format, output).await,
    }
}

#[allow(clippy::too_many_arguments)]
async fn start_run(
    config: &Config,
    actor_id: &str,
    set: Vec<String>,
    input: Option<String>,
    input_file: Option<PathBuf>,
    no_watch: bool,
    results_limit: Option<u32>,
    output: Option<PathBuf>,
) -> Result<()> {
    let client = authed_client(config)?;

    let actor = client.get_actor(actor_id).await?;
    let input = build_input(&actor, &set, input, input_file)?;

    let mut monitor_config = MonitorConfig::default();
    if let Some(limit) = results_limit {
        monitor_config.results_limit = limit;
    }
    let monitor = RunMonitor::with_config(Arc::new(client), monitor_config);

    let watch = match monitor.start(actor_id, input).await {
        Ok(watch) => watch,
        Err(StartError::InvalidInput(msg)) => {
            println!("{} {}", "✗ Input rejected:".red(), msg);
            anyhow::bail!("run not started")
        }
        Err(StartError::Failed(msg)) => {
            println!("{} {}", "✗ Failed to start run:".red(), msg);
            anyhow::bail!("run not started")
        }
    };

    println!(
        "{} Run {} started ({})",
        "▸".cyan(),
        watch.run_id().bold(),
        colorize_status(watch.initial_status())
    );

    if no_watch {
        println!(
            "{}",
            format!("Check progress with: actrun run status {}", watch.run_id()).dimmed()
        );
        return Ok(());
    }

    watch_run(watch, output).await
}

async fn watch_run(mut watch: RunWatch, output: Option<PathBuf>) -> Result<()> {
    let mut last_status: Option<RunStatus> = None;
    let mut results: Option<Value> = None;

    while let Some(event) = watch.next_event().await {
        match event {
            RunEvent::Status(snapshot) => {
                // Only report transitions, not every poll.
                if last_status != Some(snapshot.status) {
                    println!(
                        "  {} {}",
                        colorize_status(snapshot.status),
                        status_message(snapshot.status).dimmed()
                    );
                    last_status = Some(snapshot.status);
                }
            }
            RunEvent::Results(value) => {
                results = Some(value);
            }
            RunEvent::ResultsError(msg) => {
                println!("{} {}", "✗ Failed to load results:".red(), msg);
            }
            RunEvent::Finished { status } => {
                println!(
                    "{} Run finished: {} after {}",
                    "▸".cyan(),
                    colorize_status(status),
                    format_duration(watch.elapsed())
                );
                break;
            }
        }
    }

    if let Some(results) = results {
        println!();
        render_results(&results, Some(watch.elapsed()));
        if let Some(path) = output {
            write_results(&path, &results)?;
        }
    }

    Ok(())
}

async fn run_status(config: &Config, run_id: &str) -> Result<()> {
    let client = authed_client(config)?;
    let status = client.run_status(run_id).await?;

    println!("{}", "Run Status:".bold());
    println!("  ID:       {}", status.run_id.cyan());
    println!("  Status:   {}", colorize_status(status.status));
    if let Some(started) = status.started_at {
        println!("  Started:  {}", started.format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(finished) = status.finished_at {
        println!("  Finished: {}", finished.format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(stats) = &status.stats
        && let Ok(pretty) = serde_json::to_string_pretty(stats)
    {
        println!("\n{}", "Stats:".bold());
        println!("{}", pretty);
    }

    Ok(())
}

async fn run_results(
    config: &Config,
    run_id: &str,
    limit: Option<u32>,
    format: Option<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    let client = authed_client(config)?;
    let response = client
        .run_results(run_id, limit, format.as_deref())
        .await?;

    render_results(&response.results, None);
    if let Some(path) = output {
        write_results(&path, &response.results)?;
    }

    Ok(())
}

/// Builds the run input: defaults first, then raw JSON (authoritative when
/// given), then individual field edits.
fn build_input(
    actor: &ActorDetail,
    set: &[String],
    input: Option<String>,
    input_file: Option<PathBuf>,
) -> Result<Value> {
    let schema = InputSchema::from_value(actor.input_schema.as_ref());
    let form = schema
        .as_ref()
        .map(|s| build_form(s, &actor.default_run_input))
        .unwrap_or_default();

    let mut config = InputConfig::from_defaults(&actor.default_run_input);

    let raw = match (input, input_file) {
        (Some(text), _) => Some(text),
        (None, Some(path)) => Some(
            std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?,
        ),
        (None, None) => None,
    };

    if let Some(raw) = raw {
        config
            .apply_raw_text(&raw)
            .context("input is not a valid JSON object")?;
    }

    for pair in set {
        apply_set_pair(&mut config, &form, pair)?;
    }

    Ok(config.into_value())
}

fn apply_set_pair(config: &mut InputConfig, form: &Form, pair: &str) -> Result<()> {
    let (name, value) = pair
        .split_once('=')
        .with_context(|| format!("--set '{}' is not of the form name=value", pair))?;

    let field = form.field(name).with_context(|| {
        format!(
            "unknown field '{}'; the actor declares: {}",
            name,
            form.fields
                .iter()
                .map(|f| f.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    })?;

    config
        .apply_field(field, value)
        .with_context(|| format!("invalid value for '{}'", name))?;
    Ok(())
}

fn render_results(results: &Value, elapsed: Option<std::time::Duration>) {
    match preview_table(results) {
        Some(table) => {
            println!("{}", "Results preview:".bold());
            println!("{}", table);
        }
        None => {
            let empty = results.as_array().is_some_and(Vec::is_empty);
            if empty {
                println!("{}", "The actor completed but returned no data.".yellow());
            } else if let Ok(pretty) = serde_json::to_string_pretty(results) {
                println!("{}", "Results:".bold());
                println!("{}", pretty);
            }
        }
    }

    print_result_stats(results, elapsed);
}

fn write_results(path: &PathBuf, results: &Value) -> Result<()> {
    let pretty = serde_json::to_string_pretty(results)?;
    std::fs::write(path, pretty)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("{}", format!("Results written to {}", path.display()).green());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn actor_with_schema() -> ActorDetail {
        ActorDetail {
            id: "a1".to_string(),
            name: "scraper".to_string(),
            title: "Scraper".to_string(),
            description: None,
            input_schema: Some(json!({
                "type": "object",
                "properties": {
                    "startUrl": { "type": "string" },
                    "maxPages": { "type": "integer", "minimum": 1, "maximum": 100 },
                    "headless": { "type": "boolean" }
                },
                "required": ["startUrl"]
            })),
            output_schema: None,
            default_run_input: json!({ "startUrl": "https://example.com", "maxPages": 10 }),
            example_run_input: json!({}),
            versions: None,
        }
    }

    #[test]
    fn test_build_input_from_defaults_and_sets() {
        let actor = actor_with_schema();
        let input = build_input(
            &actor,
            &["maxPages=25".to_string(), "headless=true".to_string()],
            None,
            None,
        )
        .unwrap();

        assert_eq!(
            input,
            json!({
                "startUrl": "https://example.com",
                "maxPages": 25,
                "headless": true
            })
        );
    }

    #[test]
    fn test_raw_input_replaces_defaults() {
        let actor = actor_with_schema();
        let input = build_input(
            &actor,
            &[],
            Some(r#"{ "startUrl": "https://other.example" }"#.to_string()),
            None,
        )
        .unwrap();

        // The raw edit is authoritative: defaults are gone.
        assert_eq!(input, json!({ "startUrl": "https://other.example" }));
    }

    #[test]
    fn test_set_after_raw_input_wins() {
        let actor = actor_with_schema();
        let input = build_input(
            &actor,
            &["maxPages=3".to_string()],
            Some(r#"{ "startUrl": "https://other.example", "maxPages": 99 }"#.to_string()),
            None,
        )
        .unwrap();

        assert_eq!(input["maxPages"], json!(3));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let actor = actor_with_schema();
        let err = build_input(&actor, &["bogus=1".to_string()], None, None).unwrap_err();
        assert!(err.to_string().contains("unknown field 'bogus'"));
    }

    #[test]
    fn test_invalid_raw_input_is_rejected() {
        let actor = actor_with_schema();
        assert!(build_input(&actor, &[], Some("{ broken".to_string()), None).is_err());
    }

    #[test]
    fn test_out_of_range_set_is_rejected() {
        let actor = actor_with_schema();
        let err = build_input(&actor, &["maxPages=500".to_string()], None, None).unwrap_err();
        assert!(err.to_string().contains("invalid value for 'maxPages'"));
    }
}
