//! workout-tui: a terminal browser for a workout exercise catalog.
//!
//! Exercises are fetched from a remote JSON endpoint and cached in a
//! local SQLite database, so the last successful snapshot stays available
//! when the endpoint is unreachable.

mod app;
mod cli;
mod data;
mod state;
mod ui;

use std::fs::File;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use cli::{AppConfig, Cli, Commands};
use data::{Cache, ExerciseRepository, HttpExerciseApi};
use state::{ExerciseStore, UiState};

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse_args();

    match cli.command {
        Commands::Show { url, db_path } => {
            let config = AppConfig::from_args(url, db_path);

            // The TUI owns the terminal, so logs go to a file
            init_file_logging(&config)?;

            app::run(config)?;
        }
        Commands::Fetch { url, db_path, name } => {
            init_stderr_logging();

            let config = AppConfig::from_args(url, db_path);
            run_fetch(&config, name.as_deref())?;
        }
    }

    Ok(())
}

/// One-shot headless refresh: fetch, update the cache, print the result.
/// Exits non-zero when the refresh ends in an error state.
fn run_fetch(config: &AppConfig, name: Option<&str>) -> Result<()> {
    let api = HttpExerciseApi::new(config.url.as_str())?;
    let cache = Cache::open(&config.db_path)?;
    let mut repo = ExerciseRepository::new(api, cache);

    let mut store = ExerciseStore::new();
    store.refresh(&mut repo);

    match store.state() {
        UiState::Success(exercises) => {
            if let Some(name) = name {
                let Some(exercise) = store.lookup(name) else {
                    anyhow::bail!("no exercise named {name:?}");
                };
                println!("{}", exercise.name);
                println!("  Body part:  {}", exercise.body_part);
                println!("  Difficulty: {}", exercise.difficulty);
                println!("  Equipment:  {}", exercise.equipment_label());
                println!("  Image:      {}", exercise.image);
                println!();
                println!("{}", exercise.description);
            } else {
                for exercise in exercises {
                    println!(
                        "{:<30} {:<15} {:<14} equipment: {}",
                        exercise.name,
                        exercise.body_part,
                        exercise.difficulty,
                        exercise.equipment_label()
                    );
                }
                if store.is_from_cache() {
                    eprintln!("(offline: showing cached snapshot)");
                }
            }
            Ok(())
        }
        UiState::Error(message) => anyhow::bail!("{message}"),
        // refresh() is synchronous, it never ends in Loading
        UiState::Loading => Ok(()),
    }
}

/// Log to a file next to the cache database (the TUI uses the alternate
/// screen, so nothing may be written to the terminal)
fn init_file_logging(config: &AppConfig) -> Result<()> {
    let log_path = config.log_path();
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {parent:?}"))?;
    }
    let log_file = File::create(&log_path)
        .with_context(|| format!("Failed to create log file: {log_path:?}"))?;

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(Mutex::new(log_file))
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install log subscriber")?;

    Ok(())
}

/// Log to stderr for the headless subcommand
fn init_stderr_logging() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}
