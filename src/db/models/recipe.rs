// src/db/models/recipe.rs

//! Recipe model - the row behind a draft or published recipe
//!
//! Ingredients and directions are stored as JSON arrays of `{"desc": ...}`
//! objects in a single text column each. Status changes go through
//! `mark_published`; everything else here only touches drafts.

use crate::db;
use crate::error::Result;
use rusqlite::{Connection, OptionalExtension, Row, params};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Recipe lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipeStatus {
    Draft,
    Published,
}

impl RecipeStatus {
    pub fn as_str(&self) -> &str {
        match self {
            RecipeStatus::Draft => "draft",
            RecipeStatus::Published => "published",
        }
    }
}

impl FromStr for RecipeStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "draft" => Ok(RecipeStatus::Draft),
            "published" => Ok(RecipeStatus::Published),
            _ => Err(format!("Invalid recipe status: {s}")),
        }
    }
}

/// One ingredient or direction entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    pub desc: String,
}

impl ListItem {
    pub fn new(desc: impl Into<String>) -> Self {
        Self { desc: desc.into() }
    }
}

/// Serialize a list column
pub fn encode_items(items: &[ListItem]) -> Result<String> {
    Ok(serde_json::to_string(items)?)
}

/// Deserialize a list column; an empty column is an empty list
pub fn decode_items(raw: &str) -> std::result::Result<Vec<ListItem>, serde_json::Error> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw)
}

/// A recipe row
#[derive(Debug, Clone)]
pub struct Recipe {
    pub id: Option<i64>,
    pub author_id: Option<i64>,
    pub status: RecipeStatus,
    pub title: String,
    pub ingredients: Vec<ListItem>,
    pub directions: Vec<ListItem>,
    pub photo: Option<String>,
    pub edit_date: Option<String>,
    pub pub_date: Option<String>,
}

const SELECT_COLUMNS: &str = "SELECT id, author_id, status, title, ingredients, directions, photo, edit_date, pub_date FROM recipes";

impl Recipe {
    /// Create a new draft with empty ingredient and direction lists
    pub fn new_draft(author_id: i64, title: String) -> Self {
        Self {
            id: None,
            author_id: Some(author_id),
            status: RecipeStatus::Draft,
            title,
            ingredients: Vec::new(),
            directions: Vec::new(),
            photo: None,
            edit_date: None,
            pub_date: None,
        }
    }

    pub fn is_draft(&self) -> bool {
        self.status == RecipeStatus::Draft
    }

    /// Insert this recipe as a draft
    pub fn insert(&mut self, conn: &Connection) -> Result<i64> {
        let edit_date = db::now_timestamp();
        conn.execute(
            "INSERT INTO recipes (author_id, status, title, ingredients, directions, photo, edit_date)
             VALUES (?1, 'draft', ?2, ?3, ?4, ?5, ?6)",
            params![
                &self.author_id,
                &self.title,
                encode_items(&self.ingredients)?,
                encode_items(&self.directions)?,
                &self.photo,
                &edit_date,
            ],
        )?;

        let id = conn.last_insert_rowid();
        self.id = Some(id);
        self.status = RecipeStatus::Draft;
        self.edit_date = Some(edit_date);
        Ok(id)
    }

    /// Find a recipe by ID
    pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Self>> {
        let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} WHERE id = ?1"))?;
        let recipe = stmt.query_row([id], Self::from_row).optional()?;
        Ok(recipe)
    }

    /// Write title, lists and photo back, bumping the edit date
    ///
    /// Only draft rows are touched; returns false if the row is not a draft.
    pub fn save_draft(&mut self, conn: &Connection) -> Result<bool> {
        let id = self.require_id()?;
        let edit_date = db::now_timestamp();
        let updated = conn.execute(
            "UPDATE recipes
             SET title = ?1, ingredients = ?2, directions = ?3, photo = ?4, edit_date = ?5
             WHERE id = ?6 AND status = 'draft'",
            params![
                &self.title,
                encode_items(&self.ingredients)?,
                encode_items(&self.directions)?,
                &self.photo,
                &edit_date,
                id,
            ],
        )?;

        if updated > 0 {
            self.edit_date = Some(edit_date);
        }
        Ok(updated > 0)
    }

    /// Replace the category set of a recipe
    pub fn set_categories(conn: &Connection, recipe_id: i64, slugs: &[String]) -> Result<()> {
        conn.execute(
            "DELETE FROM recipe_categories WHERE recipe_id = ?1",
            [recipe_id],
        )?;

        let mut stmt = conn.prepare(
            "INSERT OR IGNORE INTO recipe_categories (recipe_id, category_slug) VALUES (?1, ?2)",
        )?;
        for slug in slugs {
            stmt.execute(params![recipe_id, slug])?;
        }
        Ok(())
    }

    /// Slugs of the categories attached to a recipe
    pub fn category_slugs(conn: &Connection, recipe_id: i64) -> Result<Vec<String>> {
        let mut stmt = conn.prepare(
            "SELECT category_slug FROM recipe_categories WHERE recipe_id = ?1 ORDER BY category_slug",
        )?;
        let slugs = stmt
            .query_map([recipe_id], |row| row.get(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(slugs)
    }

    /// Draft -> Published, stamping the publish date
    ///
    /// Returns false (and leaves `self` untouched) if the row was not a draft.
    pub fn mark_published(&mut self, conn: &Connection, pub_date: String) -> Result<bool> {
        let id = self.require_id()?;
        let updated = conn.execute(
            "UPDATE recipes SET status = 'published', pub_date = ?1
             WHERE id = ?2 AND status = 'draft'",
            params![&pub_date, id],
        )?;

        if updated > 0 {
            self.status = RecipeStatus::Published;
            self.pub_date = Some(pub_date);
        }
        Ok(updated > 0)
    }

    /// Hard-delete a draft; published rows are left alone
    pub fn delete_draft(conn: &Connection, id: i64) -> Result<bool> {
        let removed = conn.execute(
            "DELETE FROM recipes WHERE id = ?1 AND status = 'draft'",
            [id],
        )?;
        Ok(removed > 0)
    }

    /// Number of favourites pointing at a recipe
    pub fn favourite_count(conn: &Connection, id: i64) -> Result<i64> {
        let count = conn.query_row(
            "SELECT COUNT(*) FROM favourites WHERE recipe_id = ?1",
            [id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn require_id(&self) -> Result<i64> {
        self.id.ok_or_else(|| {
            crate::error::Error::InitError("Cannot update recipe without ID".to_string())
        })
    }

    /// Convert a database row to a Recipe
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let status_str: String = row.get(2)?;
        let status = status_str.parse::<RecipeStatus>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                2,
                rusqlite::types::Type::Text,
                Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, e)),
            )
        })?;

        let ingredients_raw: String = row.get(4)?;
        let ingredients = decode_items(&ingredients_raw).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
        })?;
        let directions_raw: String = row.get(5)?;
        let directions = decode_items(&directions_raw).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
        })?;

        Ok(Self {
            id: Some(row.get(0)?),
            author_id: row.get(1)?,
            status,
            title: row.get(3)?,
            ingredients,
            directions,
            photo: row.get(6)?,
            edit_date: row.get(7)?,
            pub_date: row.get(8)?,
        })
    }
}
