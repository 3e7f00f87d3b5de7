//! Database query implementations.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::{params, Connection};

use crate::models::{NewSessionRecord, SessionRecord};

/// Parse a timestamp string flexibly from various formats.
fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    // SQLite's own datetime() output: "YYYY-MM-DD HH:MM:SS"
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Ok(naive.and_utc());
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }

    anyhow::bail!("Invalid timestamp format: {s}")
}

/// Queries for sessions table.
pub struct SessionQueries;

impl SessionQueries {
    /// Insert a new session and return it with its assigned id.
    pub fn insert(conn: &Connection, session: &NewSessionRecord) -> Result<SessionRecord> {
        conn.execute(
            "INSERT INTO sessions (date, reps) VALUES (?1, ?2)",
            params![session.date.to_rfc3339(), session.reps],
        )
        .context("Failed to insert session")?;

        Ok(session.clone().into_record(conn.last_insert_rowid()))
    }

    /// Get a session by ID.
    pub fn get_by_id(conn: &Connection, id: i64) -> Result<Option<SessionRecord>> {
        let mut stmt = conn.prepare("SELECT id, date, reps FROM sessions WHERE id = ?1")?;

        let result = stmt.query_row(params![id], |row| Ok(Self::row_to_session(row)));

        match result {
            Ok(session) => Ok(Some(session?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List the most recent sessions, newest first.
    pub fn list_recent(conn: &Connection, limit: usize) -> Result<Vec<SessionRecord>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let mut stmt = conn.prepare(
            "SELECT id, date, reps FROM sessions ORDER BY julianday(date) DESC, id DESC LIMIT ?1",
        )?;

        let rows = stmt.query_map(params![limit], |row| Ok(Self::row_to_session(row)))?;

        let mut sessions = Vec::new();
        for row in rows {
            sessions.push(row??);
        }
        Ok(sessions)
    }

    /// Count stored sessions.
    pub fn count(conn: &Connection) -> Result<i64> {
        let count = conn.query_row("SELECT COUNT(*) FROM sessions", [], |row| row.get(0))?;
        Ok(count)
    }

    fn row_to_session(row: &rusqlite::Row<'_>) -> Result<SessionRecord> {
        let date_str: String = row.get(1)?;
        let date = parse_timestamp(&date_str)?;

        Ok(SessionRecord {
            id: row.get(0)?,
            date,
            reps: row.get(2)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use chrono::TimeZone;

    #[test]
    fn test_insert_assigns_unique_ids() {
        let db = Database::open_in_memory().unwrap();

        let first = SessionQueries::insert(db.conn(), &NewSessionRecord::new()).unwrap();
        let second = SessionQueries::insert(db.conn(), &NewSessionRecord::new()).unwrap();

        assert!(first.id > 0);
        assert!(second.id > first.id);
        assert_eq!(SessionQueries::count(db.conn()).unwrap(), 2);
    }

    #[test]
    fn test_get_by_id() {
        let db = Database::open_in_memory().unwrap();
        let date = Utc.with_ymd_and_hms(2024, 3, 9, 18, 0, 0).unwrap();

        let stored =
            SessionQueries::insert(db.conn(), &NewSessionRecord::new().with_reps(25).at(date))
                .unwrap();

        let fetched = SessionQueries::get_by_id(db.conn(), stored.id)
            .unwrap()
            .unwrap();
        assert_eq!(fetched, stored);
        assert_eq!(fetched.reps, 25);
        assert_eq!(fetched.date, date);

        assert!(SessionQueries::get_by_id(db.conn(), stored.id + 100)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_default_reps_is_zero() {
        let db = Database::open_in_memory().unwrap();

        let stored = SessionQueries::insert(db.conn(), &NewSessionRecord::new()).unwrap();
        let fetched = SessionQueries::get_by_id(db.conn(), stored.id)
            .unwrap()
            .unwrap();
        assert_eq!(fetched.reps, 0);
    }

    #[test]
    fn test_list_recent_orders_newest_first() {
        let db = Database::open_in_memory().unwrap();
        let early = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2024, 1, 2, 8, 0, 0).unwrap();

        let a = SessionQueries::insert(db.conn(), &NewSessionRecord::new().at(early)).unwrap();
        let b = SessionQueries::insert(db.conn(), &NewSessionRecord::new().at(late)).unwrap();
        let c = SessionQueries::insert(db.conn(), &NewSessionRecord::new().at(late)).unwrap();

        let ids: Vec<i64> = SessionQueries::list_recent(db.conn(), 10)
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec![c.id, b.id, a.id]);

        assert_eq!(SessionQueries::list_recent(db.conn(), 1).unwrap().len(), 1);
    }

    #[test]
    fn test_list_recent_mixed_date_formats() {
        let db = Database::open_in_memory().unwrap();
        db.conn()
            .execute(
                "INSERT INTO sessions (date, reps) VALUES ('2024-06-01 23:00:00', 1)",
                [],
            )
            .unwrap();
        let morning = Utc.with_ymd_and_hms(2024, 6, 1, 1, 0, 0).unwrap();
        SessionQueries::insert(db.conn(), &NewSessionRecord::new().with_reps(2).at(morning))
            .unwrap();

        let reps: Vec<i64> = SessionQueries::list_recent(db.conn(), 10)
            .unwrap()
            .into_iter()
            .map(|s| s.reps)
            .collect();
        assert_eq!(reps, vec![1, 2]);
    }

    #[test]
    fn test_reads_sqlite_datetime_format() {
        let db = Database::open_in_memory().unwrap();
        db.conn()
            .execute(
                "INSERT INTO sessions (date, reps) VALUES ('2024-06-01 12:30:00', 4)",
                [],
            )
            .unwrap();

        let sessions = SessionQueries::list_recent(db.conn(), 10).unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(
            sessions[0].date,
            Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_err());
    }
}
