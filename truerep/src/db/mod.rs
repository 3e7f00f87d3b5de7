//! Database module for `SQLite` operations.

mod connection;
mod queries;

pub use connection::{Database, DEFAULT_DB_FILE};
pub use queries::SessionQueries;
