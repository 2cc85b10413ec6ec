// src/commands.rs
//! Command handlers for the recipebox CLI

use anyhow::{Context, Result};
use recipebox::db;
use recipebox::db::models::{Category, User, slugify};
use tracing::info;

/// Initialize the database
pub fn cmd_init(db_path: &str) -> Result<()> {
    info!("Initializing recipebox database at: {}", db_path);
    db::init(db_path).with_context(|| format!("Failed to initialize {}", db_path))?;
    println!("Database initialized successfully at: {}", db_path);
    Ok(())
}

/// Start the HTTP server
#[cfg(feature = "server")]
pub fn cmd_serve(config: Option<&str>, bind: Option<&str>, db_path: Option<&str>) -> Result<()> {
    use recipebox::server::{AppConfig, run_server};
    use std::path::{Path, PathBuf};

    let app_config = match config {
        Some(path) => AppConfig::load(Path::new(path))?,
        None => AppConfig::default(),
    };
    let mut server_config = app_config.to_server_config()?;

    if let Some(bind) = bind {
        server_config.bind_addr = bind
            .parse()
            .with_context(|| format!("Invalid bind address: {}", bind))?;
    }
    if let Some(db_path) = db_path {
        server_config.db_path = PathBuf::from(db_path);
        server_config.media_dir = db::paths::media_dir(db_path);
    }

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime.block_on(run_server(server_config))
}

pub fn cmd_user_add(db_path: &str, username: &str, email: &str) -> Result<()> {
    let conn = db::open(db_path)?;
    let mut user = User::new(username.to_string(), email.to_string());
    let id = user
        .insert(&conn)
        .with_context(|| format!("Failed to add user '{}' (username and email must be unique)", username))?;

    info!("Added user {} ({})", username, id);
    println!("Added user {} with id {}", username, id);
    Ok(())
}

pub fn cmd_user_list(db_path: &str) -> Result<()> {
    let conn = db::open(db_path)?;
    let users = User::list_all(&conn)?;

    if users.is_empty() {
        println!("No users registered");
        return Ok(());
    }

    println!("{:<6} {:<24} {:<32} JOINED", "ID", "USERNAME", "EMAIL");
    for user in users {
        println!(
            "{:<6} {:<24} {:<32} {}",
            user.id.unwrap_or_default(),
            user.username,
            user.email,
            user.date_joined.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

pub fn cmd_user_remove(db_path: &str, id: i64) -> Result<()> {
    let conn = db::open(db_path)?;
    if !User::delete(&conn, id)? {
        anyhow::bail!("User {} not found", id);
    }
    info!("Removed user {}", id);
    println!("Removed user {}", id);
    Ok(())
}

pub fn cmd_category_add(db_path: &str, name: &str, slug: Option<&str>) -> Result<()> {
    let conn = db::open(db_path)?;
    let slug = slug.map(str::to_string).unwrap_or_else(|| slugify(name));
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a slug from '{}'; pass --slug", name);
    }

    Category::with_slug(name.to_string(), slug.clone())
        .insert(&conn)
        .with_context(|| format!("Failed to add category '{}' (name and slug must be unique)", name))?;

    println!("Added category {} ({})", name, slug);
    Ok(())
}

pub fn cmd_category_list(db_path: &str) -> Result<()> {
    let conn = db::open(db_path)?;
    let categories = Category::list_all(&conn)?;

    if categories.is_empty() {
        println!("No categories defined");
        return Ok(());
    }

    for category in categories {
        println!("{:<24} {}", category.slug, category.name);
    }
    Ok(())
}
