//! CLI argument definitions.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

use crate::config::{LogFormat, ServeConfig};
use crate::db::DEFAULT_DB_FILE;

/// TrueRep - serve the rep counter and collect session data
#[derive(Parser, Debug)]
#[command(name = "truerep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log output format
    #[arg(long, global = true, value_enum, env = "TRUEREP_LOG_FORMAT", default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web server
    Serve(ServeConfig),

    /// Create the sessions database schema
    InitDb {
        /// Path to the SQLite database
        #[arg(long, env = "TRUEREP_DATABASE", default_value = DEFAULT_DB_FILE)]
        database: PathBuf,
    },

    /// List stored sessions, newest first
    Sessions {
        /// Path to the SQLite database
        #[arg(long, env = "TRUEREP_DATABASE", default_value = DEFAULT_DB_FILE)]
        database: PathBuf,

        /// Maximum number of sessions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Record a session by hand
    Record {
        /// Path to the SQLite database
        #[arg(long, env = "TRUEREP_DATABASE", default_value = DEFAULT_DB_FILE)]
        database: PathBuf,

        /// Repetitions performed
        #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
        reps: i64,

        /// When the session happened (RFC 3339), defaults to now
        #[arg(long)]
        date: Option<DateTime<Utc>>,
    },

    /// Show a single stored session
    Show {
        /// Session ID
        id: i64,

        /// Path to the SQLite database
        #[arg(long, env = "TRUEREP_DATABASE", default_value = DEFAULT_DB_FILE)]
        database: PathBuf,
    },
}
