// tests/lifecycle.rs

//! Lifecycle tests: drafting, publishing, freezing, and the visibility guard.

mod common;

use common::{complete_draft, published_recipe, setup_test_db, strings};
use recipebox::catalog::{self, DraftEdit, NewDraft, PublishOutcome};
use recipebox::db;
use recipebox::db::models::{Recipe, RecipeStatus, User};
use recipebox::{Error, Viewer};

#[test]
fn test_soup_from_draft_to_published() {
    let (_dir, db_path, users) = setup_test_db();
    let mut conn = db::open(&db_path).unwrap();

    let draft = catalog::create_draft(
        &mut conn,
        &users.ann,
        &NewDraft {
            title: "Soup".to_string(),
            categories: strings(&["mains"]),
        },
    )
    .unwrap();
    let id = draft.id.unwrap();
    assert_eq!(draft.status, RecipeStatus::Draft);
    assert!(draft.pub_date.is_none());

    let edit = DraftEdit {
        title: "Soup".to_string(),
        categories: strings(&["mains"]),
        ingredients: strings(&["salt", "water"]),
        directions: strings(&["boil water", "add salt"]),
        photo: None,
    };
    let outcome = catalog::edit_draft(&mut conn, &users.ann, id, &edit).unwrap();
    assert!(outcome.warnings.is_empty());

    let published = match catalog::publish(&mut conn, &users.ann, id).unwrap() {
        PublishOutcome::Published(recipe) => recipe,
        PublishOutcome::Blocked { reason, .. } => panic!("unexpected block: {reason}"),
    };
    assert_eq!(published.status, RecipeStatus::Published);
    let pub_date = published.pub_date.clone().unwrap();

    // Frozen from here on
    assert!(matches!(
        catalog::edit_draft(&mut conn, &users.ann, id, &edit),
        Err(Error::PermissionDenied(_))
    ));
    assert!(matches!(
        catalog::publish(&mut conn, &users.ann, id),
        Err(Error::PermissionDenied(_))
    ));
    assert!(matches!(
        catalog::delete_draft(&mut conn, &users.ann, id),
        Err(Error::PermissionDenied(_))
    ));

    let stored = Recipe::find_by_id(&conn, id).unwrap().unwrap();
    assert_eq!(stored.status, RecipeStatus::Published);
    assert_eq!(stored.pub_date.as_deref(), Some(pub_date.as_str()));
}

#[test]
fn test_empty_draft_cannot_publish() {
    let (_dir, db_path, users) = setup_test_db();
    let mut conn = db::open(&db_path).unwrap();

    let draft = catalog::create_draft(
        &mut conn,
        &users.ann,
        &NewDraft {
            title: "Empty".to_string(),
            categories: strings(&["soups"]),
        },
    )
    .unwrap();
    let id = draft.id.unwrap();

    match catalog::publish(&mut conn, &users.ann, id).unwrap() {
        PublishOutcome::Blocked { recipe, reason } => {
            assert_eq!(reason, catalog::PUBLISH_BLOCKED);
            assert!(recipe.is_draft());
        }
        PublishOutcome::Published(_) => panic!("empty draft was published"),
    }

    let stored = Recipe::find_by_id(&conn, id).unwrap().unwrap();
    assert_eq!(stored.status, RecipeStatus::Draft);
    assert!(stored.pub_date.is_none());
}

#[test]
fn test_one_empty_list_still_blocks() {
    let (_dir, db_path, users) = setup_test_db();
    let mut conn = db::open(&db_path).unwrap();
    let id = complete_draft(&mut conn, &users.ann, "Half done");

    let outcome = catalog::edit_draft(
        &mut conn,
        &users.ann,
        id,
        &DraftEdit {
            title: "Half done".to_string(),
            categories: strings(&["mains"]),
            ingredients: strings(&["salt"]),
            directions: strings(&["   "]),
            photo: None,
        },
    )
    .unwrap();
    assert_eq!(outcome.warnings, vec![catalog::EMPTY_LISTS_WARNING]);
    assert!(matches!(
        catalog::publish(&mut conn, &users.ann, id).unwrap(),
        PublishOutcome::Blocked { .. }
    ));
}

#[test]
fn test_guard_on_draft_detail() {
    let (_dir, db_path, users) = setup_test_db();
    let mut conn = db::open(&db_path).unwrap();
    let id = complete_draft(&mut conn, &users.ann, "Private");

    assert!(matches!(
        catalog::recipe_detail(&conn, &Viewer::Anonymous, id),
        Err(Error::PermissionDenied(_))
    ));
    assert!(matches!(
        catalog::recipe_detail(&conn, &users.bob, id),
        Err(Error::PermissionDenied(_))
    ));

    let detail = catalog::recipe_detail(&conn, &users.ann, id).unwrap();
    assert_eq!(detail.title, "Private");
    assert_eq!(detail.ingredients.len(), 2);
    assert_eq!(detail.directions.len(), 2);
}

#[test]
fn test_other_users_cannot_mutate_drafts() {
    let (_dir, db_path, users) = setup_test_db();
    let mut conn = db::open(&db_path).unwrap();
    let id = complete_draft(&mut conn, &users.ann, "Ann's");

    for viewer in [&users.bob, &Viewer::Anonymous] {
        assert!(matches!(
            catalog::publish(&mut conn, viewer, id),
            Err(Error::PermissionDenied(_))
        ));
        assert!(matches!(
            catalog::delete_draft(&mut conn, viewer, id),
            Err(Error::PermissionDenied(_))
        ));
    }
    assert!(Recipe::find_by_id(&conn, id).unwrap().unwrap().is_draft());
}

#[test]
fn test_published_recipe_survives_author_removal() {
    let (_dir, db_path, users) = setup_test_db();
    let mut conn = db::open(&db_path).unwrap();
    let id = published_recipe(&mut conn, &users.ann, "Orphan stew");

    assert!(User::delete(&conn, users.ann.id().unwrap()).unwrap());

    let detail = catalog::recipe_detail(&conn, &Viewer::Anonymous, id).unwrap();
    assert_eq!(detail.author_id, None);
    assert_eq!(detail.author, "Account deleted");
}

#[test]
fn test_missing_recipe_is_not_found() {
    let (_dir, db_path, users) = setup_test_db();
    let mut conn = db::open(&db_path).unwrap();

    assert!(matches!(
        catalog::recipe_detail(&conn, &users.ann, 4242),
        Err(Error::NotFound(_))
    ));
    assert!(matches!(
        catalog::publish(&mut conn, &users.ann, 4242),
        Err(Error::NotFound(_))
    ));
}
