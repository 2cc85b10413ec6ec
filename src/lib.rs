// src/lib.rs

//! Recipebox
//!
//! A small recipe-sharing service. Authors write recipes as private drafts,
//! publish them once both the ingredient and direction lists are filled in,
//! and other users browse, favourite and comment on published recipes.
//!
//! # Architecture
//!
//! - Database-first: all state in one SQLite file
//! - `catalog`: lifecycle, visibility guard, listings and social actions
//! - `server`: JSON HTTP surface over the catalog (feature `server`)

pub mod catalog;
pub mod db;
mod error;

#[cfg(feature = "server")]
pub mod server;

pub use catalog::{Operation, Viewer};
pub use db::models::{Category, Comment, Favourite, ListItem, Recipe, RecipeStatus, User};
pub use error::{Error, FieldError, Result, ValidationErrors};
