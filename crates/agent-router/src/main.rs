//! Command-line front end for the agent routing engine.
//!
//! # Usage
//!
//! ```bash
//! # Route a task with the built-in catalog
//! agent-router route "analyze the statistical trends in this dataset"
//!
//! # Replay past outcomes first, then route with a custom catalog
//! agent-router --catalog profiles.toml route "fix the login bug" --outcomes outcomes.jsonl
//!
//! # Registry statistics
//! ROUTER_SCORE_WINDOW=5 agent-router stats --outcomes outcomes.jsonl
//! ```
//!
//! JSON goes to stdout; logs go to stderr (`RUST_LOG`, default `info`).

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::CatalogSource;
use routing::{AgentRouter, Domain, TaskContext};
use std::path::PathBuf;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML profile catalog (overrides ROUTER_CATALOG_PATH; built-in table if neither is set)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Default profile id (overrides ROUTER_DEFAULT_PROFILE)
    #[arg(long, global = true)]
    default_profile: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Select the best profile for a task
    Route {
        /// Task description
        task: String,

        /// Context as a JSON object
        #[arg(long)]
        context: Option<String>,

        /// JSON-lines outcomes to replay before routing
        #[arg(long)]
        outcomes: Option<PathBuf>,
    },

    /// List catalog profiles, optionally filtered
    Profiles {
        #[arg(long)]
        domain: Option<Domain>,

        #[arg(long)]
        capability: Option<String>,
    },

    /// Print registry statistics
    Stats {
        /// JSON-lines outcomes to replay first
        #[arg(long)]
        outcomes: Option<PathBuf>,
    },

    /// Show the score breakdown of one profile for a task
    Explain {
        profile: String,
        task: String,
    },
}

fn parse_context(raw: Option<&str>) -> Result<TaskContext> {
    match raw {
        None => Ok(TaskContext::new()),
        Some(raw) => {
            let value: serde_json::Value =
                serde_json::from_str(raw).context("--context must be valid JSON")?;
            Ok(TaskContext::from_value(value))
        }
    }
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(router: &AgentRouter, command: Command) -> Result<()> {
    match command {
        Command::Route {
            task,
            context,
            outcomes,
        } => {
            if let Some(path) = outcomes {
                config::replay_outcomes(router, &path)?;
            }
            let context = parse_context(context.as_deref())?;
            let decision = router.select_agent(&task, &context);
            print_json(&decision)
        }
        Command::Profiles { domain, capability } => {
            let profiles = match (domain, capability) {
                (Some(domain), _) => router.agents_by_domain(domain),
                (None, Some(capability)) => router.agents_by_capability(&capability),
                (None, None) => router.all_agents().to_vec(),
            };
            print_json(&profiles)
        }
        Command::Stats { outcomes } => {
            if let Some(path) = outcomes {
                config::replay_outcomes(router, &path)?;
            }
            let stats = router.registry_stats()?;
            print_json(&stats)
        }
        Command::Explain { profile, task } => {
            let breakdown = router
                .explain(&profile, &task, &TaskContext::new())?
                .with_context(|| format!("Unknown profile: {}", profile))?;
            print_json(&breakdown)
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let source = CatalogSource::resolve(args.catalog);
    let router = config::build_router(&source, args.default_profile)?;

    run(&router, args.command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse_route() {
        let args = Args::try_parse_from([
            "agent-router",
            "route",
            "write a poem",
            "--context",
            "{\"task_id\": \"t1\"}",
        ])
        .unwrap();
        match args.command {
            Command::Route { task, context, .. } => {
                assert_eq!(task, "write a poem");
                assert_eq!(
                    parse_context(context.as_deref()).unwrap().task_id(),
                    Some("t1")
                );
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_args_parse_domain_filter() {
        let args =
            Args::try_parse_from(["agent-router", "profiles", "--domain", "security"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Profiles {
                domain: Some(Domain::Security),
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_context_rejected() {
        assert!(parse_context(Some("{not json")).is_err());
        assert!(parse_context(Some("[1, 2]")).unwrap().is_empty());
    }

    #[test]
    fn test_run_explain_unknown_profile() {
        let router = AgentRouter::with_builtin_catalog().unwrap();
        let err = run(
            &router,
            Command::Explain {
                profile: "nobody".into(),
                task: "x".into(),
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("nobody"));
    }
}
