// src/catalog/detail.rs

//! Single-recipe read views

use crate::catalog::guard::{self, Operation, Viewer};
use crate::catalog::lifecycle::{EMPTY_LISTS_WARNING, load_for, publish_blocker};
use crate::catalog::social::RenderedComment;
use crate::db::models::{Category, Comment, Favourite, ListItem, Recipe, RecipeStatus, User, display_name};
use crate::error::{Error, Result};
use rusqlite::Connection;
use serde::Serialize;

/// Everything shown on a recipe page
#[derive(Debug, Clone, Serialize)]
pub struct RecipeDetail {
    pub id: i64,
    pub title: String,
    pub status: RecipeStatus,
    pub author_id: Option<i64>,
    pub author: String,
    pub categories: Vec<Category>,
    pub ingredients: Vec<ListItem>,
    pub directions: Vec<ListItem>,
    pub photo: Option<String>,
    pub edit_date: Option<String>,
    pub pub_date: Option<String>,
    pub favourite_count: i64,
    pub comments: Vec<RenderedComment>,
    /// Whether the viewer has favourited this recipe
    pub is_liked: bool,
    /// Publish blocker for drafts with an empty list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<&'static str>,
}

impl RecipeDetail {
    fn build(conn: &Connection, viewer: &Viewer, recipe: Recipe) -> Result<Self> {
        let id = recipe
            .id
            .ok_or_else(|| Error::NotFound("Recipe without id".to_string()))?;

        let author = match recipe.author_id {
            Some(author_id) => User::find_by_id(conn, author_id)?.map(|u| u.username),
            None => None,
        };
        let is_liked = match viewer.id() {
            Some(user_id) => Favourite::exists(conn, user_id, id)?,
            None => false,
        };
        let comments = Comment::find_by_recipe(conn, id)?
            .iter()
            .map(RenderedComment::from_comment)
            .collect();
        let warning = if recipe.is_draft() && publish_blocker(&recipe).is_some() {
            Some(EMPTY_LISTS_WARNING)
        } else {
            None
        };

        Ok(Self {
            id,
            title: recipe.title,
            status: recipe.status,
            author_id: recipe.author_id,
            author: display_name(author.as_deref()),
            categories: Category::find_by_recipe(conn, id)?,
            ingredients: recipe.ingredients,
            directions: recipe.directions,
            photo: recipe.photo,
            edit_date: recipe.edit_date,
            pub_date: recipe.pub_date,
            favourite_count: Recipe::favourite_count(conn, id)?,
            comments,
            is_liked,
            warning,
        })
    }
}

/// A recipe the viewer may read: published, or their own draft
pub fn recipe_detail(conn: &Connection, viewer: &Viewer, id: i64) -> Result<RecipeDetail> {
    let recipe = load_for(conn, viewer, id, Operation::Read)?;
    RecipeDetail::build(conn, viewer, recipe)
}

/// The author's preview of one of their drafts
///
/// Anything that is not a draft is not found here, published or not.
pub fn draft_detail(conn: &Connection, viewer: &Viewer, id: i64) -> Result<RecipeDetail> {
    viewer.require_user()?;
    let recipe = Recipe::find_by_id(conn, id)?
        .filter(Recipe::is_draft)
        .ok_or_else(|| Error::NotFound(format!("Draft {id}")))?;

    guard::check(viewer, &recipe, Operation::Read)?;
    RecipeDetail::build(conn, viewer, recipe)
}
