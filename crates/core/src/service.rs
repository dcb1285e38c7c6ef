//! Entry point for genre suggestions on raw file names.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tracing::{error, info, warn};

use crate::library::LibraryStore;
use crate::suggester::{build_suggester, GenreSuggester, GenreSuggestion, SuggesterConfig};
use crate::title::clean_title;

/// Message returned when no backend could be set up.
pub const NOT_CONFIGURED_MESSAGE: &str =
    "Genre suggester not configured. Check that an LLM API key is set.";

/// Cleans file names, loads the known genres and asks the suggester.
///
/// Built once at start-up and shared. Calls past `max_concurrent` wait for
/// a free slot; each call is cut off after the configured timeout.
pub struct GenreService {
    suggester: Option<Arc<dyn GenreSuggester>>,
    store: LibraryStore,
    permits: Semaphore,
    timeout: Duration,
}

impl GenreService {
    pub fn new(
        suggester: Option<Arc<dyn GenreSuggester>>,
        store: LibraryStore,
        config: &SuggesterConfig,
    ) -> Self {
        Self {
            suggester,
            store,
            permits: Semaphore::new(config.max_concurrent.max(1)),
            timeout: Duration::from_secs(config.timeout_secs.max(1) as u64),
        }
    }

    /// Build the suggester chain from `config` and wrap it.
    pub async fn from_config(config: &SuggesterConfig, store: LibraryStore) -> Self {
        let suggester = build_suggester(config).await;
        Self::new(suggester, store, config)
    }

    /// Name of the primary backend, if any.
    pub fn suggester_name(&self) -> Option<&str> {
        self.suggester.as_ref().map(|s| s.name())
    }

    pub fn store(&self) -> &LibraryStore {
        &self.store
    }

    /// Suggest a genre for the movie at `raw_path` (a path or file name).
    pub async fn suggest_genre_for_movie(&self, raw_path: &str) -> GenreSuggestion {
        let Some(suggester) = &self.suggester else {
            error!("No genre suggester configured");
            return GenreSuggestion::error(NOT_CONFIGURED_MESSAGE);
        };

        let title = clean_title(raw_path);
        info!("Processing movie: '{}'", title);

        let genres = match self.store.genres().await {
            Ok(genres) => genres,
            Err(e) => {
                error!("Failed to load genres: {}", e);
                return GenreSuggestion::error(format!("Failed to load genres: {}", e));
            }
        };

        let Ok(_permit) = self.permits.acquire().await else {
            return GenreSuggestion::error("Genre service is shutting down");
        };

        match tokio::time::timeout(self.timeout, suggester.suggest(&title, &genres)).await {
            Ok(suggestion) => suggestion,
            Err(_) => {
                warn!("Genre suggestion for '{}' timed out", title);
                GenreSuggestion::error(format!(
                    "Genre suggestion timed out after {}s",
                    self.timeout.as_secs()
                ))
            }
        }
    }

    /// Release backend clients and refuse further calls.
    pub async fn shutdown(&self) {
        self.permits.close();
        if let Some(suggester) = &self.suggester {
            suggester.cleanup().await;
        }
    }
}
