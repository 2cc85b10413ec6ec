// src/catalog/validate.rs

//! Field validation for recipe and comment submissions
//!
//! Cleaners push into a shared [`ValidationErrors`] so one submission reports
//! every bad field at once.

use crate::db::models::{Category, ListItem};
use crate::error::{Result, ValidationErrors};
use rusqlite::Connection;

pub const TITLE_MAX: usize = 254;
pub const INGREDIENT_MIN: usize = 3;
pub const INGREDIENT_MAX: usize = 64;
pub const DIRECTION_MIN: usize = 6;
pub const DIRECTION_MAX: usize = 254;
pub const COMMENT_MIN: usize = 10;
pub const COMMENT_MAX: usize = 250;

/// Accepted photo file extensions
pub const PHOTO_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Trim a title and check it is present and short enough
pub fn clean_title(raw: &str, errors: &mut ValidationErrors) -> String {
    let title = raw.trim().to_string();
    let len = title.chars().count();
    if len == 0 {
        errors.add("title", "This field is required.");
    } else if len > TITLE_MAX {
        errors.add(
            "title",
            format!("Ensure this value has at most {TITLE_MAX} characters (it has {len})."),
        );
    }
    title
}

/// Deduplicate category slugs and check each one exists
pub fn clean_categories(
    conn: &Connection,
    raw: &[String],
    errors: &mut ValidationErrors,
) -> Result<Vec<String>> {
    let mut slugs: Vec<String> = Vec::with_capacity(raw.len());
    for slug in raw {
        let slug = slug.trim();
        if !slug.is_empty() && !slugs.iter().any(|s| s == slug) {
            slugs.push(slug.to_string());
        }
    }

    if slugs.is_empty() {
        errors.add("categories", "Select at least one category.");
        return Ok(slugs);
    }

    for slug in &slugs {
        if Category::find_by_slug(conn, slug)?.is_none() {
            errors.add(
                "categories",
                format!("Select a valid choice. {slug} is not one of the available choices."),
            );
        }
    }
    Ok(slugs)
}

/// Drop blank entries and length-check the rest
///
/// An empty result is fine here; emptiness only matters at publish time.
pub fn clean_items(
    field: &str,
    raw: &[String],
    min: usize,
    max: usize,
    errors: &mut ValidationErrors,
) -> Vec<ListItem> {
    let mut items = Vec::with_capacity(raw.len());
    for (index, entry) in raw.iter().enumerate() {
        let desc = entry.trim();
        if desc.is_empty() {
            continue;
        }
        let len = desc.chars().count();
        if len < min || len > max {
            errors.add(
                &format!("{field}[{index}]"),
                format!("Ensure this value has between {min} and {max} characters (it has {len})."),
            );
        }
        items.push(ListItem::new(desc));
    }
    items
}

pub fn clean_ingredients(raw: &[String], errors: &mut ValidationErrors) -> Vec<ListItem> {
    clean_items("ingredients", raw, INGREDIENT_MIN, INGREDIENT_MAX, errors)
}

pub fn clean_directions(raw: &[String], errors: &mut ValidationErrors) -> Vec<ListItem> {
    clean_items("directions", raw, DIRECTION_MIN, DIRECTION_MAX, errors)
}

/// Trim a comment and check its length
pub fn clean_comment(raw: &str) -> Result<String> {
    let text = raw.trim().to_string();
    let len = text.chars().count();
    let mut errors = ValidationErrors::new();
    if !(COMMENT_MIN..=COMMENT_MAX).contains(&len) {
        errors.add(
            "text",
            format!(
                "Ensure this value has between {COMMENT_MIN} and {COMMENT_MAX} characters (it has {len})."
            ),
        );
    }
    errors.into_result()?;
    Ok(text)
}

/// Storage reference for an uploaded photo
///
/// Photos are stored as `user_photos/<recipe id>.<ext>`; before the recipe
/// has an id a random name is used instead.
pub fn photo_reference(
    recipe_id: Option<i64>,
    filename: &str,
    errors: &mut ValidationErrors,
) -> Option<String> {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    if !PHOTO_EXTENSIONS.contains(&ext.as_str()) {
        errors.add(
            "photo",
            format!(
                "Upload a valid image. Allowed extensions are: {}.",
                PHOTO_EXTENSIONS.join(", ")
            ),
        );
        return None;
    }

    let stem = match recipe_id {
        Some(id) => id.to_string(),
        None => uuid::Uuid::new_v4().simple().to_string(),
    };
    Some(format!("user_photos/{stem}.{ext}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_title_rules() {
        let mut errors = ValidationErrors::new();
        assert_eq!(clean_title("  Soup ", &mut errors), "Soup");
        assert!(errors.is_empty());

        clean_title("   ", &mut errors);
        assert!(errors.has("title"));

        let mut errors = ValidationErrors::new();
        clean_title(&"x".repeat(TITLE_MAX + 1), &mut errors);
        assert!(errors.has("title"));
    }

    #[test]
    fn test_categories_must_exist() {
        let conn = db::open_in_memory().unwrap();
        Category::new("Mains".to_string()).insert(&conn).unwrap();

        let mut errors = ValidationErrors::new();
        let slugs = clean_categories(&conn, &strings(&["mains", "mains"]), &mut errors).unwrap();
        assert_eq!(slugs, vec!["mains"]);
        assert!(errors.is_empty());

        clean_categories(&conn, &strings(&["mains", "nope"]), &mut errors).unwrap();
        assert!(errors.has("categories"));

        let mut errors = ValidationErrors::new();
        clean_categories(&conn, &[], &mut errors).unwrap();
        assert!(errors.has("categories"));
    }

    #[test]
    fn test_items_drop_blanks_and_check_length() {
        let mut errors = ValidationErrors::new();
        let items = clean_ingredients(&strings(&["salt", "  ", "", " water "]), &mut errors);
        assert!(errors.is_empty());
        assert_eq!(items, vec![ListItem::new("salt"), ListItem::new("water")]);

        let items = clean_directions(&strings(&["stir"]), &mut errors);
        assert_eq!(items.len(), 1);
        assert!(errors.has("directions[0]"));
    }

    #[test]
    fn test_empty_lists_are_valid() {
        let mut errors = ValidationErrors::new();
        assert!(clean_ingredients(&[], &mut errors).is_empty());
        assert!(clean_directions(&strings(&[" "]), &mut errors).is_empty());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_comment_bounds() {
        assert!(clean_comment("too short").is_err());
        assert_eq!(clean_comment("  just right!  ").unwrap(), "just right!");
        assert!(clean_comment(&"y".repeat(COMMENT_MAX)).is_ok());
        assert!(clean_comment(&"y".repeat(COMMENT_MAX + 1)).is_err());
    }

    #[test]
    fn test_photo_reference() {
        let mut errors = ValidationErrors::new();
        assert_eq!(
            photo_reference(Some(12), "Dinner.JPG", &mut errors).as_deref(),
            Some("user_photos/12.jpg")
        );
        let anonymous = photo_reference(None, "pic.png", &mut errors).unwrap();
        assert!(anonymous.starts_with("user_photos/") && anonymous.ends_with(".png"));
        assert!(errors.is_empty());

        assert!(photo_reference(Some(1), "notes.txt", &mut errors).is_none());
        assert!(errors.has("photo"));
    }
}
