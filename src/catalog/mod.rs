// src/catalog/mod.rs

//! Recipe catalog
//!
//! Business operations on top of the database models: the draft/published
//! lifecycle, the visibility guard, listings, and favourites and comments.
//! Every function here takes an open connection and the current [`Viewer`];
//! the HTTP layer only translates requests and results.

pub mod detail;
pub mod guard;
pub mod lifecycle;
pub mod listing;
pub mod social;
pub mod validate;

pub use detail::{RecipeDetail, draft_detail, recipe_detail};
pub use guard::{Operation, Viewer, authorize};
pub use lifecycle::{
    DraftEdit, EMPTY_LISTS_WARNING, EditOutcome, NewDraft, PUBLISH_BLOCKED, PublishOutcome,
    create_draft, delete_draft, edit_draft, publish, publish_blocker,
};
pub use listing::{FavouriteEntry, Index, Page, Paginator, RecipeSummary};
pub use social::{RenderedComment, add_comment, toggle_favourite};
