//! Recursive scan of a movie folder.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, info, warn};

use super::error::LibraryError;
use super::types::{is_movie_file, MovieFile, UNCATEGORIZED};
use crate::metrics;

/// Folders with this marker anywhere in their path are skipped.
const RECYCLE_MARKER: &str = "#recycle";

/// Make sure `folder` exists and can be created or opened.
pub async fn check_folder_access(folder: &Path) -> Result<(), LibraryError> {
    match fs::create_dir_all(folder).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            let err = LibraryError::access_denied(folder.to_path_buf(), &e);
            warn!("{}", err);
            Err(err)
        }
        Err(e) => Err(LibraryError::DirectoryCreationFailed {
            path: folder.to_path_buf(),
            source: e,
        }),
    }
}

/// List every movie below `folder`, sorted by title ignoring case.
///
/// A movie's current genre is the name of the folder holding it when that
/// name is one of `genres` (exact match).
pub async fn scan_movies(folder: &Path, genres: &[String]) -> Result<Vec<MovieFile>, LibraryError> {
    check_folder_access(folder).await?;

    let mut movies = Vec::new();
    let mut pending: Vec<PathBuf> = vec![folder.to_path_buf()];

    while let Some(dir) = pending.pop() {
        if is_recycle_dir(&dir) {
            debug!("Skipping {}", dir.display());
            continue;
        }

        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if dir == folder => {
                return Err(match e.kind() {
                    std::io::ErrorKind::PermissionDenied => {
                        LibraryError::access_denied(folder.to_path_buf(), &e)
                    }
                    _ => e.into(),
                });
            }
            Err(e) => {
                warn!("Cannot read {}: {}", dir.display(), e);
                continue;
            }
        };

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if entry.file_type().await?.is_dir() {
                pending.push(path);
            } else if is_movie_file(&path) {
                movies.push(describe(folder, &path, genres));
            }
        }
    }

    movies.sort_by_key(|movie| movie.title.to_lowercase());
    metrics::MOVIES_SCANNED.inc_by(movies.len() as u64);
    info!("Found {} movies in {}", movies.len(), folder.display());
    Ok(movies)
}

fn is_recycle_dir(dir: &Path) -> bool {
    dir.to_string_lossy().to_lowercase().contains(RECYCLE_MARKER)
}

fn describe(base: &Path, path: &Path, genres: &[String]) -> MovieFile {
    let relative = path.strip_prefix(base).unwrap_or(path);

    let parent_name = relative
        .parent()
        .and_then(|p| p.file_name())
        .map(|name| name.to_string_lossy().into_owned());
    let current_genre = parent_name
        .filter(|name| genres.iter().any(|g| g == name))
        .unwrap_or_else(|| UNCATEGORIZED.to_string());

    MovieFile {
        title: path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default(),
        path: relative.to_string_lossy().into_owned(),
        base_folder: base.to_string_lossy().into_owned(),
        current_genre,
        suggested_genre: None,
    }
}
