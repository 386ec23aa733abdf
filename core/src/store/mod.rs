//! SQLite persistence layer.
//!
//! RULE: Only the store talks to the database.
//! Scoring, recommendation and orchestration call store methods; they never
//! execute SQL directly.

mod consultation;
mod customer;
mod employee;
mod portfolio;
mod prediction;

use crate::{error::GuardResult, profile::CustomerProfile};
use rusqlite::{Connection, Row};

pub use portfolio::CategoryCount;

pub struct GuardStore {
    conn: Connection,
    /// Location handed to `open`; `None` for a private in-memory store.
    path: Option<String>,
}

impl GuardStore {
    /// Open the profile store at `path`, which may be a `file:` URI.
    /// Foreign keys are enforced so that deleting a customer cascades to
    /// its services, cached score and consultation history.
    pub fn open(path: &str) -> GuardResult<Self> {
        let flags = rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
            | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
            | rusqlite::OpenFlags::SQLITE_OPEN_URI;
        let conn = Connection::open_with_flags(path, flags)?;
        // Readers keep serving lookups while a consultation is appended.
        // Memory-backed databases refuse WAL and stay in their default mode.
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn, path: Some(path.to_string()) })
    }

    /// Private scratch database. Nothing else can connect to it.
    pub fn in_memory() -> GuardResult<Self> {
        let conn = Connection::open(":memory:")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn, path: None })
    }

    /// Second connection onto the same profile store, e.g. a concurrent
    /// request racing this one for the cached score. A private in-memory
    /// store has no shared path, so this yields a fresh empty database.
    pub fn reopen(&self) -> GuardResult<Self> {
        match self.path.as_deref() {
            Some(path) => Self::open(path),
            None       => Self::in_memory(),
        }
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> GuardResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_foundation.sql"))?;
        Ok(())
    }
}

fn flag(value: bool) -> i64 {
    if value { 1 } else { 0 }
}

/// Decode the leading customer columns
/// (customer_id, gender, tenure, senior_citizen, partner, dependents).
fn profile_from_row(row: &Row<'_>) -> rusqlite::Result<CustomerProfile> {
    Ok(CustomerProfile {
        customer_id:    row.get(0)?,
        gender:         row.get(1)?,
        tenure:         row.get::<_, i64>(2)?.max(0) as u32,
        senior_citizen: row.get::<_, i64>(3)? != 0,
        partner:        row.get::<_, i64>(4)? != 0,
        dependents:     row.get::<_, i64>(5)? != 0,
    })
}
