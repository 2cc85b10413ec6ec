// src/db/models/category.rs

//! Category model - shared tags recipes are filed under
//!
//! The slug doubles as the primary key and appears in category URLs.

use crate::error::Result;
use rusqlite::{Connection, OptionalExtension, Row, params};
use serde::Serialize;

/// A recipe category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub slug: String,
    pub name: String,
}

impl Category {
    /// Create a category, deriving the slug from the name
    pub fn new(name: String) -> Self {
        let slug = slugify(&name);
        Self { slug, name }
    }

    /// Create a category with an explicit slug
    pub fn with_slug(name: String, slug: String) -> Self {
        Self { slug, name }
    }

    /// Insert this category into the database
    pub fn insert(&self, conn: &Connection) -> Result<()> {
        conn.execute(
            "INSERT INTO categories (slug, name) VALUES (?1, ?2)",
            params![&self.slug, &self.name],
        )?;
        Ok(())
    }

    /// Find a category by slug
    pub fn find_by_slug(conn: &Connection, slug: &str) -> Result<Option<Self>> {
        let mut stmt = conn.prepare("SELECT slug, name FROM categories WHERE slug = ?1")?;
        let category = stmt.query_row([slug], Self::from_row).optional()?;
        Ok(category)
    }

    /// List all categories ordered by name
    pub fn list_all(conn: &Connection) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare("SELECT slug, name FROM categories ORDER BY name")?;
        let categories = stmt
            .query_map([], Self::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(categories)
    }

    /// Categories attached to a recipe, ordered by name
    pub fn find_by_recipe(conn: &Connection, recipe_id: i64) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT c.slug, c.name FROM categories c
             JOIN recipe_categories rc ON rc.category_slug = c.slug
             WHERE rc.recipe_id = ?1
             ORDER BY c.name",
        )?;
        let categories = stmt
            .query_map([recipe_id], Self::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(categories)
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            slug: row.get(0)?,
            name: row.get(1)?,
        })
    }
}

/// Lowercase ASCII slug: runs of anything non-alphanumeric become one `-`
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}
