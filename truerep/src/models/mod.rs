//! Data models for truerep entities.

mod session;

pub use session::{NewSessionRecord, SessionRecord};
