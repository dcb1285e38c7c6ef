//! JSON file holding the library settings.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tokio::fs;
use tracing::{debug, info};

use super::error::LibraryError;
use super::types::LibraryDocument;

/// Reads and writes the library document.
///
/// Every read goes to disk, so edits made by other processes are picked up.
/// Writes replace the whole file; concurrent writers race and the last one
/// wins.
#[derive(Debug, Clone)]
pub struct LibraryStore {
    path: PathBuf,
}

impl LibraryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document. A missing file is an empty document.
    pub async fn load(&self) -> Result<LibraryDocument, LibraryError> {
        let text = match fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No library document at {}, using empty", self.path.display());
                return Ok(LibraryDocument::default());
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&text).map_err(|source| LibraryError::InvalidDocument {
            path: self.path.clone(),
            source,
        })
    }

    /// Overwrite the file with `document`, indented by four spaces.
    pub async fn save(&self, document: &LibraryDocument) -> Result<(), LibraryError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| LibraryError::DirectoryCreationFailed {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        document
            .serialize(&mut serializer)
            .map_err(|source| LibraryError::InvalidDocument {
                path: self.path.clone(),
                source,
            })?;

        fs::write(&self.path, buffer).await?;
        debug!("Saved library document to {}", self.path.display());
        Ok(())
    }

    /// The known genres, read fresh from disk.
    pub async fn genres(&self) -> Result<Vec<String>, LibraryError> {
        Ok(self.load().await?.genres)
    }

    /// Replace both lists.
    ///
    /// Entries are trimmed and blanks dropped. Folder entries may hold several
    /// lines; genre entries may hold several comma- or newline-separated
    /// names. Genres are de-duplicated and sorted.
    pub async fn configure(
        &self,
        movie_folders: &[String],
        genres: &[String],
    ) -> Result<LibraryDocument, LibraryError> {
        let mut document = self.load().await?;

        document.movie_folders = movie_folders
            .iter()
            .flat_map(|entry| entry.lines())
            .map(str::trim)
            .filter(|folder| !folder.is_empty())
            .map(String::from)
            .collect();

        document.genres = genres
            .iter()
            .flat_map(|entry| entry.split([',', '\n']))
            .map(str::trim)
            .filter(|genre| !genre.is_empty())
            .map(String::from)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        self.save(&document).await?;
        info!(
            "Library configured: {} folders, {} genres",
            document.movie_folders.len(),
            document.genres.len()
        );
        Ok(document)
    }

    /// Append `genre` unless an identical entry exists.
    pub async fn add_genre(&self, genre: &str) -> Result<LibraryDocument, LibraryError> {
        let mut document = self.load().await?;
        if !document.genres.iter().any(|g| g == genre) {
            document.genres.push(genre.to_string());
            self.save(&document).await?;
            info!("Added genre '{}'", genre);
        }
        Ok(document)
    }
}
