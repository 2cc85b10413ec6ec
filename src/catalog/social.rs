// src/catalog/social.rs

//! Favourites and comments on published recipes

use crate::catalog::guard::{Operation, Viewer};
use crate::catalog::lifecycle::load_for;
use crate::catalog::validate;
use crate::db;
use crate::db::models::{Comment, Favourite, display_name};
use crate::error::{Error, Result};
use rusqlite::Connection;
use serde::Serialize;
use tracing::{debug, info};

/// Date format used in comment titles, e.g. `05 Mar 2024 18:30`
const COMMENT_DATE_FORMAT: &str = "%d %b %Y %H:%M";

/// A comment as shown to readers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedComment {
    /// `<author>, <date>`
    pub title: String,
    pub text: String,
}

impl RenderedComment {
    pub fn from_comment(comment: &Comment) -> Self {
        let date = comment
            .pub_date
            .as_deref()
            .and_then(db::parse_timestamp)
            .map(|at| at.format(COMMENT_DATE_FORMAT).to_string())
            .unwrap_or_default();
        Self {
            title: format!("{}, {}", display_name(comment.username.as_deref()), date),
            text: comment.text.clone(),
        }
    }
}

/// Flip the viewer's favourite on a published recipe
///
/// Returns the resulting state: true if the recipe is now a favourite.
pub fn toggle_favourite(conn: &mut Connection, viewer: &Viewer, recipe_id: i64) -> Result<bool> {
    let user_id = signed_in(viewer, Operation::Favourite)?;
    db::transaction(conn, |tx| {
        load_for(tx, viewer, recipe_id, Operation::Favourite)?;

        let observed = Favourite::exists(tx, user_id, recipe_id)?;
        let created = apply_toggle(tx, user_id, recipe_id, observed)?;
        info!(
            "User {} {} recipe {}",
            user_id,
            if created { "favourited" } else { "unfavourited" },
            recipe_id
        );
        Ok(created)
    })
}

/// Anonymous viewers are refused before the recipe is looked up
fn signed_in(viewer: &Viewer, op: Operation) -> Result<i64> {
    viewer.id().ok_or_else(|| {
        Error::PermissionDenied(format!("sign in to {}", op.as_str()))
    })
}

/// Act on an observed favourite state
///
/// If the row was absent it is inserted; when a concurrent toggle already
/// inserted it the unique constraint swallows the duplicate and the
/// favourite simply stays. If it was present it is removed.
fn apply_toggle(conn: &Connection, user_id: i64, recipe_id: i64, observed: bool) -> Result<bool> {
    if observed {
        Favourite::delete(conn, user_id, recipe_id)?;
        return Ok(false);
    }

    let mut favourite = Favourite::new(user_id, recipe_id);
    if !favourite.insert_if_absent(conn)? {
        debug!(
            "Favourite of recipe {} by user {} already existed",
            recipe_id, user_id
        );
    }
    Ok(true)
}

/// Append a comment to a published recipe
pub fn add_comment(
    conn: &mut Connection,
    viewer: &Viewer,
    recipe_id: i64,
    text: &str,
) -> Result<RenderedComment> {
    let user_id = signed_in(viewer, Operation::Comment)?;
    db::transaction(conn, |tx| {
        load_for(tx, viewer, recipe_id, Operation::Comment)?;
        let text = validate::clean_comment(text)?;

        let mut comment = Comment::new(user_id, recipe_id, text);
        let id = comment.insert(tx)?;
        if let Viewer::User { username, .. } = viewer {
            comment.username = Some(username.clone());
        }

        info!("User {} commented on recipe {} (comment {})", user_id, recipe_id, id);
        Ok(RenderedComment::from_comment(&comment))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{ListItem, Recipe, User};
    use std::sync::{Arc, Barrier};
    use std::thread;

    struct Fixture {
        conn: Connection,
        ann: Viewer,
        bob: Viewer,
        published: i64,
        draft: i64,
    }

    fn viewer(conn: &Connection, name: &str) -> Viewer {
        let mut user = User::new(name.to_string(), format!("{name}@example.com"));
        let id = user.insert(conn).unwrap();
        Viewer::User {
            id,
            username: name.to_string(),
        }
    }

    fn setup() -> Fixture {
        seed(db::open_in_memory().unwrap())
    }

    fn seed(conn: Connection) -> Fixture {
        let ann = viewer(&conn, "ann");
        let bob = viewer(&conn, "bob");

        let mut recipe = Recipe::new_draft(ann.id().unwrap(), "Flatbread".to_string());
        let published = recipe.insert(&conn).unwrap();
        recipe.ingredients = vec![ListItem::new("flour")];
        recipe.directions = vec![ListItem::new("knead the dough")];
        recipe.save_draft(&conn).unwrap();
        recipe.mark_published(&conn, db::now_timestamp()).unwrap();

        let draft = Recipe::new_draft(ann.id().unwrap(), "Secret".to_string())
            .insert(&conn)
            .unwrap();

        Fixture {
            conn,
            ann,
            bob,
            published,
            draft,
        }
    }

    #[test]
    fn test_toggle_round_trip() {
        let mut f = setup();
        assert!(toggle_favourite(&mut f.conn, &f.bob, f.published).unwrap());
        assert_eq!(Recipe::favourite_count(&f.conn, f.published).unwrap(), 1);

        assert!(!toggle_favourite(&mut f.conn, &f.bob, f.published).unwrap());
        assert_eq!(Recipe::favourite_count(&f.conn, f.published).unwrap(), 0);
    }

    #[test]
    fn test_author_may_favourite_own_recipe() {
        let mut f = setup();
        assert!(toggle_favourite(&mut f.conn, &f.ann, f.published).unwrap());
    }

    #[test]
    fn test_concurrent_toggles_serialize() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("recipebox.db");
        let db_path = db_path.to_str().unwrap().to_string();
        db::init(&db_path).unwrap();
        let f = seed(db::open(&db_path).unwrap());

        for round in 0..50 {
            let barrier = Arc::new(Barrier::new(2));
            let handles: Vec<_> = (0..2)
                .map(|_| {
                    let barrier = Arc::clone(&barrier);
                    let db_path = db_path.clone();
                    let bob = f.bob.clone();
                    let recipe_id = f.published;
                    thread::spawn(move || {
                        let mut conn = db::open(&db_path).unwrap();
                        barrier.wait();
                        toggle_favourite(&mut conn, &bob, recipe_id)
                    })
                })
                .collect();

            let mut created: Vec<bool> = handles
                .into_iter()
                .map(|h| h.join().unwrap().unwrap_or_else(|e| panic!("round {round}: {e}")))
                .collect();
            created.sort();

            // One request adds the favourite and the other removes it
            assert_eq!(created, vec![false, true], "round {round}");
            assert_eq!(Recipe::favourite_count(&f.conn, f.published).unwrap(), 0);
        }

        let mut conn = db::open(&db_path).unwrap();
        assert!(toggle_favourite(&mut conn, &f.bob, f.published).unwrap());
        assert_eq!(Recipe::favourite_count(&f.conn, f.published).unwrap(), 1);
    }

    #[test]
    fn test_insert_after_stale_absent_keeps_one_row() {
        let f = setup();
        let bob = f.bob.id().unwrap();

        assert!(apply_toggle(&f.conn, bob, f.published, false).unwrap());
        assert!(apply_toggle(&f.conn, bob, f.published, false).unwrap());

        assert_eq!(Recipe::favourite_count(&f.conn, f.published).unwrap(), 1);
    }

    #[test]
    fn test_toggle_rejected_on_draft_and_for_anonymous() {
        let mut f = setup();
        assert!(matches!(
            toggle_favourite(&mut f.conn, &f.ann, f.draft),
            Err(Error::PermissionDenied(_))
        ));
        assert!(matches!(
            toggle_favourite(&mut f.conn, &Viewer::Anonymous, f.published),
            Err(Error::PermissionDenied(_))
        ));
        assert!(matches!(
            toggle_favourite(&mut f.conn, &f.bob, 999),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_anonymous_refused_before_lookup() {
        let mut f = setup();
        assert!(matches!(
            toggle_favourite(&mut f.conn, &Viewer::Anonymous, 999),
            Err(Error::PermissionDenied(_))
        ));
        assert!(matches!(
            add_comment(&mut f.conn, &Viewer::Anonymous, 999, "a perfectly fine comment"),
            Err(Error::PermissionDenied(_))
        ));
    }

    #[test]
    fn test_add_comment_renders_title() {
        let mut f = setup();
        let rendered = add_comment(&mut f.conn, &f.bob, f.published, "  Lovely and simple.  ").unwrap();
        assert_eq!(rendered.text, "Lovely and simple.");
        assert!(rendered.title.starts_with("bob, "));

        let stored = Comment::find_by_recipe(&f.conn, f.published).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(RenderedComment::from_comment(&stored[0]), rendered);
    }

    #[test]
    fn test_add_comment_validation_and_guard() {
        let mut f = setup();
        assert!(matches!(
            add_comment(&mut f.conn, &f.bob, f.published, "short"),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            add_comment(&mut f.conn, &f.bob, f.draft, "a perfectly fine comment"),
            Err(Error::PermissionDenied(_))
        ));
        assert!(matches!(
            add_comment(&mut f.conn, &Viewer::Anonymous, f.published, "a perfectly fine comment"),
            Err(Error::PermissionDenied(_))
        ));
        assert!(Comment::find_by_recipe(&f.conn, f.published).unwrap().is_empty());
    }

    #[test]
    fn test_comment_title_for_deleted_account() {
        let comment = Comment {
            id: Some(1),
            user_id: None,
            recipe_id: 1,
            text: "still here after all".to_string(),
            pub_date: Some("2024-03-05 18:30:12.000000".to_string()),
            username: None,
        };
        assert_eq!(
            RenderedComment::from_comment(&comment).title,
            "Account deleted, 05 Mar 2024 18:30"
        );
    }
}
