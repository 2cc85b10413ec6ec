// src/db/paths.rs
//! Centralized path derivation for the data directory

use std::path::{Path, PathBuf};

/// Default data directory
pub const DEFAULT_ROOT: &str = "/var/lib/recipebox";

/// Database file name inside the data directory
pub const DB_FILE: &str = "recipebox.db";

/// Get the database path inside a data directory
pub fn db_path(root: &Path) -> PathBuf {
    root.join(DB_FILE)
}

/// Get the directory containing the database
pub fn db_dir(db_path: &str) -> PathBuf {
    Path::new(db_path)
        .parent()
        .unwrap_or(Path::new(DEFAULT_ROOT))
        .to_path_buf()
}

/// Get the media directory (uploaded photos) next to the database
pub fn media_dir(db_path: &str) -> PathBuf {
    db_dir(db_path).join("media")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_path() {
        assert_eq!(
            db_path(Path::new("/srv/recipes")),
            PathBuf::from("/srv/recipes/recipebox.db")
        );
    }

    #[test]
    fn test_media_dir() {
        assert_eq!(
            media_dir("/var/lib/recipebox/recipebox.db"),
            PathBuf::from("/var/lib/recipebox/media")
        );
    }
}
