// src/catalog/guard.rs

//! Visibility and authorization guard
//!
//! Every operation touching a specific recipe goes through [`authorize`].
//! The decision depends only on the viewer's identity, the recipe status
//! and the recipe author:
//!
//! | operation                 | Draft               | Published            |
//! |---------------------------|---------------------|----------------------|
//! | read                      | author only         | anyone               |
//! | edit / delete / publish   | author only         | nobody               |
//! | favourite / comment       | nobody              | any signed-in viewer |

use crate::db::models::{Recipe, RecipeStatus, User};
use crate::error::{Error, Result};
use tracing::warn;

/// Who is making the request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Viewer {
    Anonymous,
    User { id: i64, username: String },
}

impl Viewer {
    /// Resolve a claimed user id; unknown ids are treated as anonymous
    pub fn load(conn: &rusqlite::Connection, user_id: Option<i64>) -> Result<Self> {
        let Some(id) = user_id else {
            return Ok(Viewer::Anonymous);
        };

        match User::find_by_id(conn, id)? {
            Some(user) => Ok(Viewer::User {
                id,
                username: user.username,
            }),
            None => {
                warn!("Request claimed unknown user id {}; treating as anonymous", id);
                Ok(Viewer::Anonymous)
            }
        }
    }

    pub fn id(&self) -> Option<i64> {
        match self {
            Viewer::Anonymous => None,
            Viewer::User { id, .. } => Some(*id),
        }
    }

    /// The viewer's id, or `Unauthenticated` for anonymous viewers
    pub fn require_user(&self) -> Result<i64> {
        self.id().ok_or(Error::Unauthenticated)
    }
}

/// Operations the guard decides on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Edit,
    Delete,
    Publish,
    Favourite,
    Comment,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Read => "read",
            Operation::Edit => "edit",
            Operation::Delete => "delete",
            Operation::Publish => "publish",
            Operation::Favourite => "favourite",
            Operation::Comment => "comment",
        }
    }
}

/// Decide whether `viewer` may perform `op` on a recipe
pub fn authorize(
    viewer: Option<i64>,
    status: RecipeStatus,
    author: Option<i64>,
    op: Operation,
) -> Result<()> {
    // A recipe whose author was deleted has no owner left.
    let is_author = viewer.is_some() && viewer == author;

    let allowed = match (op, status) {
        (Operation::Read, RecipeStatus::Published) => true,
        (Operation::Read, RecipeStatus::Draft) => is_author,
        (Operation::Edit | Operation::Delete | Operation::Publish, RecipeStatus::Draft) => {
            is_author
        }
        (Operation::Edit | Operation::Delete | Operation::Publish, RecipeStatus::Published) => {
            false
        }
        (Operation::Favourite | Operation::Comment, RecipeStatus::Published) => viewer.is_some(),
        (Operation::Favourite | Operation::Comment, RecipeStatus::Draft) => false,
    };

    if allowed {
        Ok(())
    } else {
        Err(Error::PermissionDenied(format!(
            "cannot {} a {} recipe",
            op.as_str(),
            status.as_str()
        )))
    }
}

/// [`authorize`] against a loaded recipe
pub fn check(viewer: &Viewer, recipe: &Recipe, op: Operation) -> Result<()> {
    let result = authorize(viewer.id(), recipe.status, recipe.author_id, op);
    if result.is_err() {
        warn!(
            "Denied {} on recipe {:?} for viewer {:?}",
            op.as_str(),
            recipe.id,
            viewer.id()
        );
    }
    result
}
