// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use recipebox::catalog::{self, DraftEdit, NewDraft, PublishOutcome};
use recipebox::db;
use recipebox::db::models::{Category, ListItem, Recipe, User};
use recipebox::Viewer;
use rusqlite::Connection;
use tempfile::TempDir;

/// Seeded accounts
pub struct Users {
    pub ann: Viewer,
    pub bob: Viewer,
    pub cat: Viewer,
}

/// Create a test database with three users and two categories.
///
/// Returns (TempDir, db_path, users) - keep the TempDir alive to prevent cleanup.
pub fn setup_test_db() -> (TempDir, String, Users) {
    let temp_dir = tempfile::tempdir().unwrap();
    let db_path = temp_dir
        .path()
        .join("recipebox.db")
        .to_str()
        .unwrap()
        .to_string();

    db::init(&db_path).unwrap();
    let mut conn = db::open(&db_path).unwrap();

    let users = db::transaction(&mut conn, |tx| {
        Category::new("Mains".to_string()).insert(tx)?;
        Category::new("Soups".to_string()).insert(tx)?;

        let mut viewers = Vec::new();
        for name in ["ann", "bob", "cat"] {
            let mut user = User::new(name.to_string(), format!("{name}@example.com"));
            let id = user.insert(tx)?;
            viewers.push(Viewer::User {
                id,
                username: name.to_string(),
            });
        }
        let cat = viewers.pop().unwrap();
        let bob = viewers.pop().unwrap();
        let ann = viewers.pop().unwrap();
        Ok(Users { ann, bob, cat })
    })
    .unwrap();

    (temp_dir, db_path, users)
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Create and fill in a draft that is ready to publish
pub fn complete_draft(conn: &mut Connection, author: &Viewer, title: &str) -> i64 {
    let recipe = catalog::create_draft(
        conn,
        author,
        &NewDraft {
            title: title.to_string(),
            categories: strings(&["mains"]),
        },
    )
    .unwrap();
    let id = recipe.id.unwrap();

    catalog::edit_draft(
        conn,
        author,
        id,
        &DraftEdit {
            title: title.to_string(),
            categories: strings(&["mains"]),
            ingredients: strings(&["salt", "water"]),
            directions: strings(&["boil water", "add salt"]),
            photo: None,
        },
    )
    .unwrap();
    id
}

/// Create and publish a recipe through the catalog
pub fn published_recipe(conn: &mut Connection, author: &Viewer, title: &str) -> i64 {
    let id = complete_draft(conn, author, title);
    match catalog::publish(conn, author, id).unwrap() {
        PublishOutcome::Published(_) => id,
        PublishOutcome::Blocked { reason, .. } => panic!("publish blocked: {reason}"),
    }
}

/// Publish a recipe with a fixed publication timestamp
pub fn published_at(conn: &Connection, author: &Viewer, title: &str, pub_date: &str) -> i64 {
    let mut recipe = Recipe::new_draft(author.id().unwrap(), title.to_string());
    let id = recipe.insert(conn).unwrap();
    Recipe::set_categories(conn, id, &strings(&["mains"])).unwrap();
    recipe.ingredients = vec![ListItem::new("flour")];
    recipe.directions = vec![ListItem::new("bake it well")];
    recipe.save_draft(conn).unwrap();
    recipe.mark_published(conn, pub_date.to_string()).unwrap();
    id
}
