// src/db/models/comment.rs

//! Comment model - append-only remarks on published recipes

use crate::db;
use crate::error::Result;
use rusqlite::{Connection, Row, params};

/// A comment row joined with its author's username
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Option<i64>,
    pub user_id: Option<i64>,
    pub recipe_id: i64,
    pub text: String,
    pub pub_date: Option<String>,
    /// Author's username; None once the account is deleted
    pub username: Option<String>,
}

impl Comment {
    pub fn new(user_id: i64, recipe_id: i64, text: String) -> Self {
        Self {
            id: None,
            user_id: Some(user_id),
            recipe_id,
            text,
            pub_date: None,
            username: None,
        }
    }

    /// Insert this comment
    pub fn insert(&mut self, conn: &Connection) -> Result<i64> {
        let pub_date = db::now_timestamp();
        conn.execute(
            "INSERT INTO comments (user_id, recipe_id, text, pub_date) VALUES (?1, ?2, ?3, ?4)",
            params![&self.user_id, self.recipe_id, &self.text, &pub_date],
        )?;

        let id = conn.last_insert_rowid();
        self.id = Some(id);
        self.pub_date = Some(pub_date);
        Ok(id)
    }

    /// Comments on a recipe, newest first
    pub fn find_by_recipe(conn: &Connection, recipe_id: i64) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT c.id, c.user_id, c.recipe_id, c.text, c.pub_date, u.username
             FROM comments c
             LEFT JOIN users u ON u.id = c.user_id
             WHERE c.recipe_id = ?1
             ORDER BY c.pub_date DESC, c.id DESC",
        )?;
        let comments = stmt
            .query_map([recipe_id], Self::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(comments)
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: Some(row.get(0)?),
            user_id: row.get(1)?,
            recipe_id: row.get(2)?,
            text: row.get(3)?,
            pub_date: row.get(4)?,
            username: row.get(5)?,
        })
    }
}
