use clap::{Parser, Subcommand};
use shelfkeep_core::{default_log_level, LoggingConfig, DEFAULT_DATA_FILE};
use std::path::PathBuf;

/// Level used when logs go to stderr and would interleave with the menu.
const STDERR_LOG_LEVEL: &str = "warn";

#[derive(Parser)]
#[command(
    name = "shelfkeep",
    about = "Track a small book inventory: add, issue, return, list and search",
    version
)]
pub struct Cli {
    /// JSON file holding the inventory
    #[arg(long, global = true, env = "SHELFKEEP_DATA_FILE", default_value = DEFAULT_DATA_FILE)]
    pub data_file: PathBuf,

    /// Log level: trace, debug, info, warn or error
    #[arg(long, global = true, env = "SHELFKEEP_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rotating log files (stderr when unset)
    #[arg(long, global = true, env = "SHELFKEEP_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    pub fn logging_config(&self) -> LoggingConfig {
        let level = match (&self.log_level, &self.log_dir) {
            (Some(level), _) => level.clone(),
            (None, Some(_)) => default_log_level().to_string(),
            (None, None) => STDERR_LOG_LEVEL.to_string(),
        };
        LoggingConfig {
            level,
            log_dir: self.log_dir.clone(),
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Interactive menu (default)
    Menu,

    /// Add a new book
    Add {
        #[arg(long)]
        title: String,

        #[arg(long, default_value = "")]
        author: String,

        #[arg(long)]
        isbn: String,
    },

    /// Mark a book as issued
    Issue {
        isbn: String,
    },

    /// Mark an issued book as returned
    Return {
        isbn: String,
    },

    /// List every book in storage order
    List,

    /// Search by partial title (case-insensitive) or exact ISBN
    Search {
        #[arg(long, required_unless_present = "isbn", conflicts_with = "isbn")]
        title: Option<String>,

        #[arg(long)]
        isbn: Option<String>,
    },
}
