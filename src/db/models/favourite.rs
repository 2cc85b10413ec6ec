// src/db/models/favourite.rs

//! Favourite model - a user's "like" of a published recipe
//!
//! Rows are created on toggle-on and hard-deleted on toggle-off. The
//! UNIQUE(user_id, recipe_id) constraint is what keeps concurrent toggles
//! from producing two rows.

use crate::db;
use crate::error::Result;
use rusqlite::{Connection, params};

/// A favourite row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Favourite {
    pub id: Option<i64>,
    pub user_id: i64,
    pub recipe_id: i64,
    pub created_at: Option<String>,
}

impl Favourite {
    pub fn new(user_id: i64, recipe_id: i64) -> Self {
        Self {
            id: None,
            user_id,
            recipe_id,
            created_at: None,
        }
    }

    /// Insert unless the pair already exists
    ///
    /// Returns true if this call created the row. A concurrent insert of the
    /// same pair loses against the unique constraint and returns false.
    pub fn insert_if_absent(&mut self, conn: &Connection) -> Result<bool> {
        let created_at = db::now_timestamp();
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO favourites (user_id, recipe_id, created_at)
             VALUES (?1, ?2, ?3)",
            params![self.user_id, self.recipe_id, &created_at],
        )?;

        if inserted > 0 {
            self.id = Some(conn.last_insert_rowid());
            self.created_at = Some(created_at);
        }
        Ok(inserted > 0)
    }

    /// Check whether a user has favourited a recipe
    pub fn exists(conn: &Connection, user_id: i64, recipe_id: i64) -> Result<bool> {
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM favourites WHERE user_id = ?1 AND recipe_id = ?2",
            params![user_id, recipe_id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Delete the pair; returns true if a row was removed
    pub fn delete(conn: &Connection, user_id: i64, recipe_id: i64) -> Result<bool> {
        let removed = conn.execute(
            "DELETE FROM favourites WHERE user_id = ?1 AND recipe_id = ?2",
            params![user_id, recipe_id],
        )?;
        Ok(removed > 0)
    }
}
