//! Command-line interface argument parsing for workout-tui.
//!
//! - `workout-tui show` launches the TUI browser
//! - `workout-tui fetch` refreshes the catalog once and prints it
//! - `workout-tui fetch --name "Push Up"` prints a single exercise

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::data;

/// A Rust-based Terminal User Interface for browsing a workout exercise
/// catalog, with an offline cache for when the endpoint is unreachable.
#[derive(Parser, Debug)]
#[command(name = "workout-tui")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch the TUI exercise browser
    Show {
        /// URL of the exercise catalog endpoint
        #[arg(short, long)]
        url: Option<String>,

        /// Path to the cache database file
        /// Defaults to ~/.cache/workout-tui/exercises.db
        #[arg(long)]
        db_path: Option<String>,
    },

    /// Refresh the catalog once and print it without starting the TUI
    Fetch {
        /// URL of the exercise catalog endpoint
        #[arg(short, long)]
        url: Option<String>,

        /// Path to the cache database file
        #[arg(long)]
        db_path: Option<String>,

        /// Print full details for a single exercise instead of the list
        #[arg(short, long)]
        name: Option<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub url: String,
    pub db_path: PathBuf,
}

impl AppConfig {
    /// Resolve CLI arguments against the defaults
    pub fn from_args(url: Option<String>, db_path: Option<String>) -> Self {
        let url = url.unwrap_or_else(|| data::DEFAULT_URL.to_string());

        let db_path = db_path.map(PathBuf::from).unwrap_or_else(|| {
            // Check WORKOUT_TUI_DIR environment variable first
            let data_dir = if let Ok(dir) = std::env::var("WORKOUT_TUI_DIR") {
                PathBuf::from(dir)
            } else {
                dirs::cache_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("workout-tui")
            };
            data::Cache::db_path(&data_dir)
        });

        AppConfig { url, db_path }
    }

    /// Log file kept next to the cache database, so TUI logging never
    /// writes to the terminal
    pub fn log_path(&self) -> PathBuf {
        self.db_path.with_file_name("workout-tui.log")
    }
}
