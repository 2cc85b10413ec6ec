// src/db/schema.rs

//! Database schema definitions and migrations
//!
//! Every constraint the catalog relies on is declared here once: unique
//! usernames/emails/category names, the draft/published pub_date rule, and
//! the one-favourite-per-user-and-recipe rule.

use crate::error::Result;
use rusqlite::Connection;
use tracing::{debug, info};

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize the schema version tracking table
fn init_schema_version(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;
    Ok(())
}

/// Get the current schema version from the database
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    init_schema_version(conn)?;

    let version = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;

    Ok(version)
}

/// Set the schema version
fn set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])?;
    Ok(())
}

/// Apply all pending migrations to bring the database up to date
pub fn migrate(conn: &Connection) -> Result<()> {
    let current_version = get_schema_version(conn)?;
    debug!("Current schema version: {}", current_version);

    if current_version >= SCHEMA_VERSION {
        debug!("Schema is up to date");
        return Ok(());
    }

    for version in (current_version + 1)..=SCHEMA_VERSION {
        info!("Applying migration to version {}", version);
        apply_migration(conn, version)?;
        set_schema_version(conn, version)?;
    }

    info!("Schema migration complete. Now at version {}", SCHEMA_VERSION);
    Ok(())
}

fn apply_migration(conn: &Connection, version: i32) -> Result<()> {
    match version {
        1 => migrate_v1(conn),
        _ => Err(crate::Error::InitError(format!(
            "Unknown migration version: {}",
            version
        ))),
    }
}

/// Initial schema - Version 1
fn migrate_v1(conn: &Connection) -> Result<()> {
    debug!("Creating schema version 1");

    conn.execute_batch(
        "
        CREATE TABLE users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE CHECK(length(username) > 0),
            email TEXT NOT NULL UNIQUE CHECK(length(email) > 0),
            date_joined TEXT NOT NULL
        );

        CREATE TABLE categories (
            slug TEXT PRIMARY KEY CHECK(length(slug) > 0),
            name TEXT NOT NULL UNIQUE CHECK(length(name) BETWEEN 1 AND 50)
        );

        CREATE TABLE recipes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            author_id INTEGER,
            status TEXT NOT NULL DEFAULT 'draft' CHECK(status IN ('draft', 'published')),
            title TEXT NOT NULL CHECK(length(title) BETWEEN 1 AND 254),
            ingredients TEXT NOT NULL DEFAULT '[]',
            directions TEXT NOT NULL DEFAULT '[]',
            photo TEXT,
            edit_date TEXT NOT NULL,
            pub_date TEXT,
            CHECK ((status = 'draft' AND pub_date IS NULL)
                OR (status = 'published' AND pub_date IS NOT NULL)),
            FOREIGN KEY (author_id) REFERENCES users(id) ON DELETE SET NULL
        );

        CREATE INDEX idx_recipes_status_pub ON recipes(status, pub_date, edit_date);
        CREATE INDEX idx_recipes_author ON recipes(author_id, status);

        -- Published rows never change status or publish date again
        CREATE TRIGGER recipes_published_frozen
        BEFORE UPDATE OF status, pub_date ON recipes
        WHEN OLD.status = 'published'
            AND (NEW.status IS NOT OLD.status OR NEW.pub_date IS NOT OLD.pub_date)
        BEGIN
            SELECT RAISE(ABORT, 'published recipes are immutable');
        END;

        CREATE TABLE recipe_categories (
            recipe_id INTEGER NOT NULL,
            category_slug TEXT NOT NULL,
            PRIMARY KEY (recipe_id, category_slug),
            FOREIGN KEY (recipe_id) REFERENCES recipes(id) ON DELETE CASCADE,
            FOREIGN KEY (category_slug) REFERENCES categories(slug) ON DELETE RESTRICT
        );

        CREATE INDEX idx_recipe_categories_slug ON recipe_categories(category_slug);

        CREATE TABLE favourites (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            recipe_id INTEGER NOT NULL,
            created_at TEXT NOT NULL,
            UNIQUE(user_id, recipe_id),
            FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE,
            FOREIGN KEY (recipe_id) REFERENCES recipes(id) ON DELETE CASCADE
        );

        CREATE INDEX idx_favourites_recipe ON favourites(recipe_id);

        CREATE TABLE comments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER,
            recipe_id INTEGER NOT NULL,
            text TEXT NOT NULL CHECK(length(text) BETWEEN 10 AND 250),
            pub_date TEXT NOT NULL,
            FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE SET NULL,
            FOREIGN KEY (recipe_id) REFERENCES recipes(id) ON DELETE CASCADE
        );

        CREATE INDEX idx_comments_recipe ON comments(recipe_id, pub_date);
        ",
    )?;

    info!("Schema version 1 created successfully");
    Ok(())
}
