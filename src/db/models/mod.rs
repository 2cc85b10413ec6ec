// src/db/models/mod.rs

//! Data models for recipebox database entities
//!
//! This module defines Rust structs that correspond to database tables
//! and provides methods for creating, reading, updating, and deleting records.

mod category;
mod comment;
mod favourite;
mod recipe;
mod user;

pub use category::{Category, slugify};
pub use comment::Comment;
pub use favourite::Favourite;
pub use recipe::{ListItem, Recipe, RecipeStatus, decode_items, encode_items};
pub use user::{DELETED_ACCOUNT, User, display_name};
