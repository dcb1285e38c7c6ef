//! Moving movies into genre folders.

use std::path::{Component, Path, PathBuf};

use tokio::fs;
use tracing::{debug, error, info};

use super::error::LibraryError;
use super::types::is_movie_file;
use crate::metrics;

/// Create `<base_folder>/<genre>` if needed and return its path.
pub async fn ensure_genre_folder(base_folder: &Path, genre: &str) -> Result<PathBuf, LibraryError> {
    if !is_valid_genre_folder(genre) {
        return Err(LibraryError::InvalidGenre(genre.to_string()));
    }

    let folder = base_folder.join(genre.trim());
    fs::create_dir_all(&folder)
        .await
        .map_err(|source| LibraryError::DirectoryCreationFailed {
            path: folder.clone(),
            source,
        })?;
    Ok(folder)
}

/// A genre must name a single folder directly below the base folder.
fn is_valid_genre_folder(genre: &str) -> bool {
    let genre = genre.trim();
    let mut components = Path::new(genre).components();
    !genre.is_empty()
        && !genre.contains(['/', '\\'])
        && matches!(components.next(), Some(Component::Normal(_)))
        && components.next().is_none()
}

/// Move the movie at `movie_path` into the `genre` folder of `base_folder`.
///
/// Relative paths are taken from `base_folder`. An existing file at the
/// destination is never overwritten. Afterwards, the folder the movie came
/// from is removed when nothing worth keeping is left in it. Returns the new
/// path.
pub async fn move_movie(
    base_folder: &Path,
    movie_path: &str,
    genre: &str,
) -> Result<PathBuf, LibraryError> {
    let genre_folder = ensure_genre_folder(base_folder, genre).await?;

    let source = {
        let path = Path::new(movie_path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_folder.join(path)
        }
    };

    let file_name = match source.file_name() {
        Some(name) if fs::try_exists(&source).await.unwrap_or(false) => name.to_owned(),
        _ => return Err(LibraryError::SourceNotFound { path: source }),
    };
    let destination = genre_folder.join(file_name);

    if destination == source {
        debug!("{} is already in {}", source.display(), genre_folder.display());
        return Ok(destination);
    }
    if fs::try_exists(&destination).await.unwrap_or(false) {
        return Err(LibraryError::DestinationExists { path: destination });
    }

    info!("Moving movie from '{}' to '{}'", source.display(), destination.display());
    relocate(&source, &destination).await?;
    metrics::MOVIES_MOVED.inc();

    if let Some(source_dir) = source.parent() {
        cleanup_source_dir(source_dir, &genre_folder, base_folder).await;
    }

    Ok(destination)
}

/// Attempts to move a file atomically (rename).
///
/// Returns `Ok(false)` when source and destination are on different
/// filesystems.
async fn try_atomic_move(source: &Path, destination: &Path) -> Result<bool, std::io::Error> {
    match fs::rename(source, destination).await {
        Ok(()) => Ok(true),
        Err(e) => {
            // EXDEV is 18 on Linux
            if e.kind() == std::io::ErrorKind::CrossesDevices || e.raw_os_error() == Some(18) {
                Ok(false)
            } else {
                Err(e)
            }
        }
    }
}

async fn relocate(source: &Path, destination: &Path) -> Result<(), LibraryError> {
    let moved = try_atomic_move(source, destination).await.map_err(|e| {
        LibraryError::move_failed(source.to_path_buf(), destination.to_path_buf(), e)
    })?;
    if moved {
        return Ok(());
    }

    debug!("Cross-device move, copying {}", source.display());
    if let Err(e) = fs::copy(source, destination).await {
        let _ = fs::remove_file(destination).await;
        return Err(LibraryError::move_failed(
            source.to_path_buf(),
            destination.to_path_buf(),
            e,
        ));
    }
    fs::remove_file(source).await.map_err(|e| {
        LibraryError::move_failed(source.to_path_buf(), destination.to_path_buf(), e)
    })
}

/// Remove `dir` when it is a leftover release folder: not the genre folder,
/// not the base folder, and holding no movies and no subfolders.
async fn cleanup_source_dir(dir: &Path, genre_folder: &Path, base_folder: &Path) {
    if dir == genre_folder || dir == base_folder {
        return;
    }
    if !fs::try_exists(dir).await.unwrap_or(false) || has_movies_or_subdirs(dir).await {
        return;
    }

    info!("Removing directory and contents: {}", dir.display());
    if let Err(e) = fs::remove_dir_all(dir).await {
        error!("Error removing directory {}: {}", dir.display(), e);
    }
}

/// Unreadable directories count as not empty.
async fn has_movies_or_subdirs(dir: &Path) -> bool {
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) => {
            error!("Error checking directory {}: {}", dir.display(), e);
            return true;
        }
    };

    loop {
        match entries.next_entry().await {
            Ok(Some(entry)) => {
                let is_dir = match entry.file_type().await {
                    Ok(file_type) => file_type.is_dir(),
                    Err(_) => return true,
                };
                if is_dir || is_movie_file(&entry.path()) {
                    return true;
                }
            }
            Ok(None) => return false,
            Err(e) => {
                error!("Error checking directory {}: {}", dir.display(), e);
                return true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        fs::write(path, b"movie").await.unwrap();
    }

    #[tokio::test]
    async fn test_ensure_genre_folder_creates_it() {
        let temp = TempDir::new().unwrap();
        let folder = ensure_genre_folder(temp.path(), "Drama").await.unwrap();
        assert_eq!(folder, temp.path().join("Drama"));
        assert!(folder.is_dir());
        // second call is a no-op
        ensure_genre_folder(temp.path(), "Drama").await.unwrap();
    }

    #[tokio::test]
    async fn test_genre_must_be_a_single_folder_name() {
        let temp = TempDir::new().unwrap();
        for genre in ["", "  ", "..", ".", "a/b", r"a\b", "/abs"] {
            let result = ensure_genre_folder(temp.path(), genre).await;
            assert!(
                matches!(result, Err(LibraryError::InvalidGenre(_))),
                "accepted {genre:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_move_relative_path_and_cleanup_release_folder() {
        let temp = TempDir::new().unwrap();
        let base = temp.path();
        let release = base.join("Heat.1995.1080p");
        touch(&release.join("Heat.1995.1080p.mkv")).await;
        touch(&release.join("Heat.nfo")).await;

        let new_path = move_movie(base, "Heat.1995.1080p/Heat.1995.1080p.mkv", "Crime")
            .await
            .unwrap();

        assert_eq!(new_path, base.join("Crime/Heat.1995.1080p.mkv"));
        assert!(new_path.is_file());
        // only an .nfo was left, so the release folder goes
        assert!(!release.exists());
    }

    #[tokio::test]
    async fn test_folder_with_other_movies_is_kept() {
        let temp = TempDir::new().unwrap();
        let base = temp.path();
        let pack = base.join("pack");
        touch(&pack.join("one.mkv")).await;
        touch(&pack.join("two.mp4")).await;

        move_movie(base, "pack/one.mkv", "Drama").await.unwrap();
        assert!(pack.join("two.mp4").exists());
    }

    #[tokio::test]
    async fn test_folder_with_subfolders_is_kept() {
        let temp = TempDir::new().unwrap();
        let base = temp.path();
        touch(&base.join("pack/one.mkv")).await;
        fs::create_dir_all(base.join("pack/extras")).await.unwrap();

        move_movie(base, "pack/one.mkv", "Drama").await.unwrap();
        assert!(base.join("pack/extras").is_dir());
    }

    #[tokio::test]
    async fn test_base_folder_is_never_removed() {
        let temp = TempDir::new().unwrap();
        let base = temp.path().join("library");
        touch(&base.join("loose.avi")).await;

        let new_path = move_movie(&base, "loose.avi", "Comedy").await.unwrap();
        assert!(new_path.is_file());
        assert!(base.is_dir());
    }

    #[tokio::test]
    async fn test_absolute_source_path() {
        let temp = TempDir::new().unwrap();
        let elsewhere = TempDir::new().unwrap();
        let source = elsewhere.path().join("incoming/Alien.avi");
        touch(&source).await;

        let new_path = move_movie(temp.path(), source.to_str().unwrap(), "Horror")
            .await
            .unwrap();
        assert_eq!(new_path, temp.path().join("Horror/Alien.avi"));
        assert!(!source.exists());
    }

    #[tokio::test]
    async fn test_missing_source() {
        let temp = TempDir::new().unwrap();
        let result = move_movie(temp.path(), "nope.mkv", "Drama").await;
        assert!(matches!(result, Err(LibraryError::SourceNotFound { .. })));
    }

    #[tokio::test]
    async fn test_existing_destination_is_not_overwritten() {
        let temp = TempDir::new().unwrap();
        let base = temp.path();
        touch(&base.join("new/Heat.mkv")).await;
        fs::create_dir_all(base.join("Crime")).await.unwrap();
        fs::write(base.join("Crime/Heat.mkv"), b"original").await.unwrap();

        let result = move_movie(base, "new/Heat.mkv", "Crime").await;
        assert!(matches!(result, Err(LibraryError::DestinationExists { .. })));
        assert_eq!(fs::read(base.join("Crime/Heat.mkv")).await.unwrap(), b"original");
        assert!(base.join("new/Heat.mkv").exists());
    }

    #[tokio::test]
    async fn test_already_in_genre_folder() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("Drama/Heat.mkv")).await;

        let new_path = move_movie(temp.path(), "Drama/Heat.mkv", "Drama").await.unwrap();
        assert_eq!(new_path, temp.path().join("Drama/Heat.mkv"));
        assert!(new_path.is_file());
    }
}
