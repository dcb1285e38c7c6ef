//! Library data types.

use serde::{Deserialize, Serialize};

/// Name reported for movies that are not inside a known genre folder.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// File extensions treated as movies.
pub const MOVIE_EXTENSIONS: &[&str] = &["mp4", "mkv", "avi", "mov"];

/// Whether `path` has one of the movie extensions (any case).
pub fn is_movie_file(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| MOVIE_EXTENSIONS.iter().any(|m| m.eq_ignore_ascii_case(ext)))
}

/// The persisted library settings.
///
/// Fields are declared in key order so the saved file has sorted keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryDocument {
    /// Known genres, reused by suggestions and folder names.
    #[serde(default)]
    pub genres: Vec<String>,
    /// Folders the user can scan.
    #[serde(default)]
    pub movie_folders: Vec<String>,
}

/// One movie found by a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovieFile {
    /// File name without extension.
    pub title: String,
    /// Path relative to `base_folder`.
    pub path: String,
    /// The scanned folder.
    pub base_folder: String,
    /// Parent folder name when it is a known genre, else "Uncategorized".
    pub current_genre: String,
    pub suggested_genre: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_movie_extensions() {
        assert!(is_movie_file(Path::new("a/Heat.mkv")));
        assert!(is_movie_file(Path::new("HEAT.MP4")));
        assert!(!is_movie_file(Path::new("Heat.srt")));
        assert!(!is_movie_file(Path::new("Heat")));
    }

    #[test]
    fn test_document_serializes_keys_sorted() {
        let doc = LibraryDocument {
            genres: vec!["Drama".to_string()],
            movie_folders: vec!["/movies".to_string()],
        };
        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(json, r#"{"genres":["Drama"],"movie_folders":["/movies"]}"#);
    }

    #[test]
    fn test_document_missing_fields_default() {
        let doc: LibraryDocument = serde_json::from_str(r#"{"genres": ["Comedy"]}"#).unwrap();
        assert_eq!(doc.genres, vec!["Comedy"]);
        assert!(doc.movie_folders.is_empty());
    }
}
