//! # goalsync
//!
//! Terminal front end for the GoalSync team goals dashboard.
//!
//! - `goalsync show` — print the dashboard once (or `--json` for the goal list)
//! - `goalsync shell` — interactive session: tick milestones, comment, like,
//!   add goals. State lives only as long as the session.

mod commands;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use goalsync_core::{Dashboard, GoalSyncConfig};
use tracing_subscriber::EnvFilter;

/// GoalSync — track team goals, milestones and discussion.
#[derive(Parser)]
#[command(name = "goalsync", version, about)]
struct Cli {
    /// Config file (ignored if it does not exist).
    #[arg(long, default_value = "goalsync.toml")]
    config: PathBuf,

    /// Start with an empty board instead of the demo goals.
    #[arg(long)]
    no_seed: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the dashboard and exit.
    Show {
        /// Print the goal list as JSON instead.
        #[arg(long)]
        json: bool,
        /// Show milestones and comments for every goal.
        #[arg(long)]
        expand_all: bool,
    },
    /// Start an interactive dashboard session.
    Shell,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they don't interleave with the rendered board.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("goalsync_core=warn".parse()?)
                .add_directive("goalsync=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let mut config = GoalSyncConfig::load_or_default(Some(cli.config.as_path()))?;
    if cli.no_seed {
        config.seed_demo = false;
    }
    let mut dashboard = Dashboard::new(config);
    tracing::debug!(goals = dashboard.goals().len(), "dashboard ready");

    match &cli.command {
        Commands::Show { json, expand_all } => {
            commands::show::execute(&mut dashboard, *json, *expand_all)
        }
        Commands::Shell => commands::shell::execute(&mut dashboard),
    }
}
