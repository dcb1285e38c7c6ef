//! Error types for the library module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or reorganising the movie library.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// The folder exists but cannot be opened or created.
    #[error("{message}")]
    AccessDenied { path: PathBuf, message: String },

    /// The movie to move does not exist.
    #[error("Source file not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// A file with the same name already sits in the genre folder.
    #[error("Destination already exists: {path}")]
    DestinationExists { path: PathBuf },

    /// The genre cannot be used as a folder name.
    #[error("Invalid genre name: '{0}'")]
    InvalidGenre(String),

    /// Failed to create a directory.
    #[error("Failed to create directory: {path}")]
    DirectoryCreationFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to move a file.
    #[error("Failed to move file from {source} to {destination}")]
    MoveFailed {
        source: PathBuf,
        destination: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// The library document is not valid JSON.
    #[error("Invalid library document {path}: {source}")]
    InvalidDocument {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LibraryError {
    pub(crate) fn move_failed(source: PathBuf, destination: PathBuf, error: std::io::Error) -> Self {
        Self::MoveFailed {
            source,
            destination,
            error,
        }
    }

    /// Access failure with instructions for granting the process access.
    pub(crate) fn access_denied(path: PathBuf, error: &std::io::Error) -> Self {
        let message = format!(
            "Cannot access folder: {}\n\n\
             To fix this, make sure the user running cinesort can read and write the folder:\n\
             1. Check the folder's owner and permissions\n\
             2. On macOS, grant Full Disk Access to the terminal app that started the server \
             (System Settings > Privacy & Security > Full Disk Access)\n\
             3. Restart the server\n\n\
             Error details: {}",
            path.display(),
            error
        );
        Self::AccessDenied { path, message }
    }
}
