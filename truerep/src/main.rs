//! TrueRep - a web app that counts exercise repetitions in the browser.
//!
//! Architecture:
//! - The server renders the index page and serves static assets
//! - `POST /api/save-session` logs and echoes session payloads
//! - A SQLite store holds session records for the CLI

mod cli;
mod config;
mod db;
mod logging;
mod models;
mod server;

use anyhow::Result;
use clap::Parser;

use cli::{execute, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    execute(cli).await
}
