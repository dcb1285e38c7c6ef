//! Genre suggestion API handler.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use tracing::info;

use cinesort_core::GenreSuggestion;

use super::handlers::{api_error, ApiError};
use crate::state::AppState;

/// Request body for a genre suggestion
#[derive(Debug, Deserialize)]
pub struct SuggestGenreBody {
    /// File name or path of the movie
    #[serde(default)]
    pub title: Option<String>,
}

/// Suggest a genre for one movie file.
///
/// Backend failures are reported in the suggestion itself with status
/// `error`, not as an HTTP error.
pub async fn suggest_genre(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SuggestGenreBody>,
) -> Result<Json<GenreSuggestion>, ApiError> {
    let Some(title) = body.title.as_deref().filter(|t| !t.trim().is_empty()) else {
        return Err(api_error(StatusCode::BAD_REQUEST, "No movie path provided"));
    };

    info!("Genre suggestion requested for '{}'", title);
    let suggestion = state.service().suggest_genre_for_movie(title).await;
    info!(
        "Suggestion for '{}': {} ({:?})",
        title,
        suggestion.status(),
        suggestion.genre()
    );
    Ok(Json(suggestion))
}
