//! Movie listing and relocation API handlers.

use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use cinesort_core::{
    library::{move_movie as relocate_movie, scan_movies},
    MovieFile,
};

use super::handlers::{api_error, ApiError};
use super::library::library_error;
use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

/// Query parameters for listing movies
#[derive(Debug, Deserialize)]
pub struct ListMoviesParams {
    /// Folder to scan; the first configured folder when absent
    pub selected_folder: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListMoviesResponse {
    pub selected_folder: String,
    pub movie_folders: Vec<String>,
    pub movies: Vec<MovieFile>,
}

/// Request body for moving a movie into a genre folder
#[derive(Debug, Deserialize)]
pub struct MoveMovieBody {
    #[serde(default)]
    pub movie_path: Option<String>,
    #[serde(default)]
    pub base_folder: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MoveMovieResponse {
    pub success: bool,
    pub new_path: String,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

// ============================================================================
// Handlers
// ============================================================================

/// Scan a library folder for movie files
pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListMoviesParams>,
) -> Result<Json<ListMoviesResponse>, ApiError> {
    let document = state.store().load().await.map_err(library_error)?;

    let selected_folder = match params.selected_folder.filter(|f| !f.trim().is_empty()) {
        Some(folder) => folder,
        None => document.movie_folders.first().cloned().ok_or_else(|| {
            api_error(StatusCode::BAD_REQUEST, "No movie folders configured")
        })?,
    };

    let movies = scan_movies(Path::new(&selected_folder), &document.genres)
        .await
        .map_err(library_error)?;

    Ok(Json(ListMoviesResponse {
        selected_folder,
        movie_folders: document.movie_folders,
        movies,
    }))
}

/// Move a movie into `<base_folder>/<genre>`
pub async fn move_movie(
    Json(body): Json<MoveMovieBody>,
) -> Result<Json<MoveMovieResponse>, ApiError> {
    let (Some(movie_path), Some(base_folder), Some(genre)) = (
        present(&body.movie_path),
        present(&body.base_folder),
        present(&body.genre),
    ) else {
        let missing: Vec<&str> = [
            ("movie_path", &body.movie_path),
            ("base_folder", &body.base_folder),
            ("genre", &body.genre),
        ]
        .into_iter()
        .filter(|(_, value)| present(value).is_none())
        .map(|(name, _)| name)
        .collect();
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            format!("Missing required parameters: {}", missing.join(", ")),
        ));
    };

    let new_path = relocate_movie(Path::new(base_folder), movie_path, genre)
        .await
        .map_err(library_error)?;
    info!("Moved '{}' to {}", movie_path, new_path.display());

    Ok(Json(MoveMovieResponse {
        success: true,
        new_path: new_path.to_string_lossy().into_owned(),
    }))
}
