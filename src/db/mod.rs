// src/db/mod.rs

//! Database layer
//!
//! All persistent state lives in a single SQLite file. Connections are cheap
//! and opened per request; foreign keys are enabled on every open.

pub mod models;
pub mod paths;
pub mod schema;

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Format used for every stored timestamp (lexical order == time order)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// How long a writer waits on a locked database before failing
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Create the database file (and parent directories) and apply migrations
pub fn init(db_path: &str) -> Result<()> {
    info!("Initializing database at {}", db_path);

    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::InitError(format!(
                    "Failed to create database directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let conn = Connection::open(db_path)?;
    configure(&conn)?;
    schema::migrate(&conn)?;
    Ok(())
}

/// Open an existing database
pub fn open(db_path: &str) -> Result<Connection> {
    if !Path::new(db_path).exists() {
        return Err(Error::NotFound(format!("Database {}", db_path)));
    }
    let conn = Connection::open(db_path)?;
    configure(&conn)?;
    Ok(conn)
}

/// Open a fresh in-memory database with the full schema applied
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    configure(&conn)?;
    schema::migrate(&conn)?;
    Ok(conn)
}

fn configure(conn: &Connection) -> Result<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    Ok(())
}

/// Run `f` inside a transaction, committing only if it returns `Ok`
///
/// The write lock is taken up front (`BEGIN IMMEDIATE`), so concurrent
/// writers queue on the busy timeout instead of failing a read-to-write
/// upgrade. Dropping the transaction on the error path rolls everything back.
pub fn transaction<F, T>(conn: &mut Connection, f: F) -> Result<T>
where
    F: FnOnce(&Transaction) -> Result<T>,
{
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let value = f(&tx)?;
    tx.commit()?;
    debug!("Transaction committed");
    Ok(value)
}

/// Render a timestamp in the stored format
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Current time in the stored format
pub fn now_timestamp() -> String {
    format_timestamp(Utc::now())
}

/// Parse a stored timestamp back into UTC
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    chrono::NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_init_creates_parent_directories() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("nested/recipebox.db");
        let db_path = db_path.to_str().unwrap();

        init(db_path).unwrap();
        assert!(Path::new(db_path).exists());

        let conn = open(db_path).unwrap();
        let fk: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk, 1);
    }

    #[test]
    fn test_init_is_idempotent() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("recipebox.db");
        let db_path = db_path.to_str().unwrap();

        init(db_path).unwrap();
        init(db_path).unwrap();

        let conn = open(db_path).unwrap();
        assert_eq!(schema::get_schema_version(&conn).unwrap(), schema::SCHEMA_VERSION);
    }

    #[test]
    fn test_open_missing_database_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("missing.db");
        assert!(matches!(
            open(db_path.to_str().unwrap()),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_transaction_rolls_back_on_error() {
        let mut conn = open_in_memory().unwrap();

        let result: Result<()> = transaction(&mut conn, |tx| {
            tx.execute(
                "INSERT INTO categories (slug, name) VALUES ('mains', 'Mains')",
                [],
            )?;
            Err(Error::InitError("boom".to_string()))
        });
        assert!(result.is_err());

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM categories", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_timestamp_round_trip_preserves_order() {
        let earlier = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let later = earlier + chrono::Duration::microseconds(1);

        let a = format_timestamp(earlier);
        let b = format_timestamp(later);
        assert!(a < b);
        assert_eq!(parse_timestamp(&a), Some(earlier));
    }
}
