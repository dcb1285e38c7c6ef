//! Library document API handlers.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::error;

use cinesort_core::{LibraryDocument, LibraryError};

use super::handlers::{api_error, ApiError};
use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

/// Request body for replacing the library settings
#[derive(Debug, Deserialize)]
pub struct ConfigureLibraryBody {
    /// Folder entries; one entry may hold several lines
    #[serde(default)]
    pub movie_folders: Vec<String>,
    /// Genre entries; one entry may hold several comma-separated names
    #[serde(default)]
    pub genres: Vec<String>,
}

/// Request body for adding a genre
#[derive(Debug, Deserialize)]
pub struct AddGenreBody {
    #[serde(default)]
    pub genre: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AddGenreResponse {
    pub success: bool,
    pub genres: Vec<String>,
}

/// HTTP status for a library failure.
pub fn library_error_status(e: &LibraryError) -> StatusCode {
    match e {
        LibraryError::SourceNotFound { .. } => StatusCode::NOT_FOUND,
        LibraryError::DestinationExists { .. } => StatusCode::CONFLICT,
        LibraryError::InvalidGenre(_) => StatusCode::BAD_REQUEST,
        LibraryError::AccessDenied { .. } => StatusCode::FORBIDDEN,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn library_error(e: LibraryError) -> ApiError {
    let status = library_error_status(&e);
    if status.is_server_error() {
        error!("Library operation failed: {}", e);
    }
    api_error(status, e.to_string())
}

// ============================================================================
// Handlers
// ============================================================================

/// Get the library document
pub async fn get_library(
    State(state): State<Arc<AppState>>,
) -> Result<Json<LibraryDocument>, ApiError> {
    state.store().load().await.map(Json).map_err(library_error)
}

/// Replace the configured folders and genres
pub async fn configure_library(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ConfigureLibraryBody>,
) -> Result<Json<LibraryDocument>, ApiError> {
    state
        .store()
        .configure(&body.movie_folders, &body.genres)
        .await
        .map(Json)
        .map_err(library_error)
}

/// Add one genre to the library
pub async fn add_genre(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AddGenreBody>,
) -> Result<Json<AddGenreResponse>, ApiError> {
    let genre = body.genre.as_deref().map(str::trim).unwrap_or_default();
    if genre.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "No genre provided"));
    }

    let document = state.store().add_genre(genre).await.map_err(library_error)?;
    Ok(Json(AddGenreResponse {
        success: true,
        genres: document.genres,
    }))
}
