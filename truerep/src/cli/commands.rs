//! CLI command execution.

use std::path::Path;

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use tracing::info;

use crate::db::{Database, SessionQueries};
use crate::logging;
use crate::models::{NewSessionRecord, SessionRecord};
use crate::server;

use super::args::{Cli, Commands};

/// Execute the parsed CLI command.
pub async fn execute(cli: Cli) -> Result<()> {
    logging::init(cli.log_format)?;

    match cli.command {
        Commands::Serve(config) => server::start_server(config).await,
        Commands::InitDb { database } => init_db(&database),
        Commands::Sessions { database, limit } => list_sessions(&database, limit),
        Commands::Record {
            database,
            reps,
            date,
        } => record_session(&database, reps, date),
        Commands::Show { id, database } => show_session(&database, id),
    }
}

fn init_db(path: &Path) -> Result<()> {
    let db = Database::open_at(path)?;
    let count = SessionQueries::count(db.conn())?;

    info!(path = %path.display(), sessions = count, "database ready");
    println!("Database ready at {} ({count} sessions)", path.display());
    Ok(())
}

fn list_sessions(path: &Path, limit: usize) -> Result<()> {
    let db = Database::open_at(path)?;
    let sessions = SessionQueries::list_recent(db.conn(), limit)?;

    if sessions.is_empty() {
        println!("No sessions found.");
        return Ok(());
    }

    println!("{:<8} {:<20} {:>6}", "ID", "DATE", "REPS");
    println!("{}", "-".repeat(36));

    for session in sessions {
        print_session(&session);
    }

    Ok(())
}

fn record_session(path: &Path, reps: i64, date: Option<DateTime<Utc>>) -> Result<()> {
    let db = Database::open_at(path)?;

    let mut session = NewSessionRecord::new().with_reps(reps);
    if let Some(date) = date {
        session = session.at(date);
    }

    let stored = SessionQueries::insert(db.conn(), &session)?;
    info!(id = stored.id, reps = stored.reps, "session recorded");
    println!("Recorded session {} ({} reps)", stored.id, stored.reps);
    Ok(())
}

fn show_session(path: &Path, id: i64) -> Result<()> {
    let db = Database::open_at(path)?;

    let Some(session) = SessionQueries::get_by_id(db.conn(), id)? else {
        bail!("Session {id} not found");
    };

    println!("{}", serde_json::to_string_pretty(&session)?);
    Ok(())
}

fn print_session(session: &SessionRecord) {
    println!(
        "{:<8} {:<20} {:>6}",
        session.id,
        session.date.format("%Y-%m-%d %H:%M:%S").to_string(),
        session.reps,
    );
}
