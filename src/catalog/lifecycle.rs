// src/catalog/lifecycle.rs

//! Recipe lifecycle: Draft -> Published
//!
//! A recipe is created as a draft holding only a title and categories. The
//! author fills in ingredients, directions and a photo over any number of
//! saves; empty lists are allowed while drafting. Publishing requires both
//! lists to be non-empty, stamps `pub_date` once, and freezes the recipe.
//! There is no way back to Draft and no way to delete a published recipe.

use crate::catalog::guard::{self, Operation, Viewer};
use crate::catalog::validate;
use crate::db;
use crate::db::models::Recipe;
use crate::error::{Error, Result, ValidationErrors};
use rusqlite::Connection;
use serde::Deserialize;
use tracing::info;

/// Warning attached to a save that leaves a list empty
pub const EMPTY_LISTS_WARNING: &str =
    "Ingredients list or directions list is empty, this recipe can't be published.";

/// Reason given when publishing is blocked
pub const PUBLISH_BLOCKED: &str =
    "Can't publish recipe - ingredients list and directions list can't be empty.";

/// Submission creating a new draft
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewDraft {
    pub title: String,
    #[serde(default)]
    pub categories: Vec<String>,
}

/// Submission replacing a draft's editable fields
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DraftEdit {
    pub title: String,
    pub categories: Vec<String>,
    pub ingredients: Vec<String>,
    pub directions: Vec<String>,
    /// File name of a freshly uploaded photo; None keeps the current one
    pub photo: Option<String>,
}

/// Result of a successful draft save
#[derive(Debug, Clone)]
pub struct EditOutcome {
    pub recipe: Recipe,
    pub warnings: Vec<&'static str>,
}

/// Result of a publish attempt the guard allowed
#[derive(Debug, Clone)]
pub enum PublishOutcome {
    Published(Recipe),
    /// Preconditions failed; the recipe is still a draft
    Blocked { recipe: Recipe, reason: &'static str },
}

/// Load a recipe and run the guard for `op`
pub fn load_for(conn: &Connection, viewer: &Viewer, id: i64, op: Operation) -> Result<Recipe> {
    let recipe =
        Recipe::find_by_id(conn, id)?.ok_or_else(|| Error::NotFound(format!("Recipe {id}")))?;
    guard::check(viewer, &recipe, op)?;
    Ok(recipe)
}

/// Why a recipe cannot be published yet, if anything
pub fn publish_blocker(recipe: &Recipe) -> Option<&'static str> {
    if recipe.ingredients.is_empty() || recipe.directions.is_empty() {
        Some(PUBLISH_BLOCKED)
    } else {
        None
    }
}

/// Create a draft owned by the viewer
///
/// The recipe row and its category links commit together.
pub fn create_draft(conn: &mut Connection, viewer: &Viewer, draft: &NewDraft) -> Result<Recipe> {
    let author = viewer.require_user()?;

    db::transaction(conn, |tx| {
        let mut errors = ValidationErrors::new();
        let title = validate::clean_title(&draft.title, &mut errors);
        let categories = validate::clean_categories(tx, &draft.categories, &mut errors)?;
        errors.into_result()?;

        let mut recipe = Recipe::new_draft(author, title);
        let id = recipe.insert(tx)?;
        Recipe::set_categories(tx, id, &categories)?;

        info!("Created draft recipe {} for user {}", id, author);
        Ok(recipe)
    })
}

/// Replace a draft's title, categories, lists and photo
pub fn edit_draft(
    conn: &mut Connection,
    viewer: &Viewer,
    id: i64,
    edit: &DraftEdit,
) -> Result<EditOutcome> {
    db::transaction(conn, |tx| {
        let mut recipe = load_for(tx, viewer, id, Operation::Edit)?;

        let mut errors = ValidationErrors::new();
        let title = validate::clean_title(&edit.title, &mut errors);
        let categories = validate::clean_categories(tx, &edit.categories, &mut errors)?;
        let ingredients = validate::clean_ingredients(&edit.ingredients, &mut errors);
        let directions = validate::clean_directions(&edit.directions, &mut errors);
        let photo = match edit.photo.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => {
                validate::photo_reference(recipe.id, name, &mut errors)
            }
            _ => recipe.photo.clone(),
        };
        errors.into_result()?;

        recipe.title = title;
        recipe.ingredients = ingredients;
        recipe.directions = directions;
        recipe.photo = photo;

        if !recipe.save_draft(tx)? {
            return Err(Error::PermissionDenied(format!(
                "recipe {id} is no longer a draft"
            )));
        }
        Recipe::set_categories(tx, id, &categories)?;

        let mut warnings = Vec::new();
        if publish_blocker(&recipe).is_some() {
            warnings.push(EMPTY_LISTS_WARNING);
        }

        info!("Saved draft recipe {}", id);
        Ok(EditOutcome { recipe, warnings })
    })
}

/// Publish a draft if both lists are filled in
pub fn publish(conn: &mut Connection, viewer: &Viewer, id: i64) -> Result<PublishOutcome> {
    db::transaction(conn, |tx| {
        let mut recipe = load_for(tx, viewer, id, Operation::Publish)?;

        if let Some(reason) = publish_blocker(&recipe) {
            info!("Publish of recipe {} blocked: empty lists", id);
            return Ok(PublishOutcome::Blocked { recipe, reason });
        }

        if !recipe.mark_published(tx, db::now_timestamp())? {
            return Err(Error::PermissionDenied(format!(
                "recipe {id} is no longer a draft"
            )));
        }

        info!("Published recipe {}", id);
        Ok(PublishOutcome::Published(recipe))
    })
}

/// Hard-delete a draft
pub fn delete_draft(conn: &mut Connection, viewer: &Viewer, id: i64) -> Result<()> {
    db::transaction(conn, |tx| {
        load_for(tx, viewer, id, Operation::Delete)?;
        if !Recipe::delete_draft(tx, id)? {
            return Err(Error::PermissionDenied(format!(
                "recipe {id} is no longer a draft"
            )));
        }
        info!("Deleted draft recipe {}", id);
        Ok(())
    })
}
