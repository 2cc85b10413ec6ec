// src/db/models/user.rs

//! User model - registered accounts
//!
//! Credentials and sessions belong to the fronting auth service; this table
//! only holds the identity recipes, favourites and comments point at.

use crate::db;
use crate::error::Result;
use rusqlite::{Connection, OptionalExtension, Row, params};

/// Display name used when a comment or recipe outlived its author
pub const DELETED_ACCOUNT: &str = "Account deleted";

/// A registered user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Option<i64>,
    pub username: String,
    pub email: String,
    pub date_joined: Option<String>,
}

impl User {
    /// Create a new user
    pub fn new(username: String, email: String) -> Self {
        Self {
            id: None,
            username,
            email,
            date_joined: None,
        }
    }

    /// Insert this user into the database
    pub fn insert(&mut self, conn: &Connection) -> Result<i64> {
        let joined = db::now_timestamp();
        conn.execute(
            "INSERT INTO users (username, email, date_joined) VALUES (?1, ?2, ?3)",
            params![&self.username, &self.email, &joined],
        )?;

        let id = conn.last_insert_rowid();
        self.id = Some(id);
        self.date_joined = Some(joined);
        Ok(id)
    }

    /// Find a user by ID
    pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Self>> {
        let mut stmt = conn.prepare(
            "SELECT id, username, email, date_joined FROM users WHERE id = ?1",
        )?;
        let user = stmt.query_row([id], Self::from_row).optional()?;
        Ok(user)
    }

    /// List all users
    pub fn list_all(conn: &Connection) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT id, username, email, date_joined FROM users ORDER BY username",
        )?;
        let users = stmt
            .query_map([], Self::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(users)
    }

    /// Delete a user; their recipes and comments stay with a null author
    pub fn delete(conn: &Connection, id: i64) -> Result<bool> {
        let removed = conn.execute("DELETE FROM users WHERE id = ?1", [id])?;
        Ok(removed > 0)
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: Some(row.get(0)?),
            username: row.get(1)?,
            email: row.get(2)?,
            date_joined: row.get(3)?,
        })
    }
}

/// Name shown for an optional author
pub fn display_name(username: Option<&str>) -> String {
    username.unwrap_or(DELETED_ACCOUNT).to_string()
}
