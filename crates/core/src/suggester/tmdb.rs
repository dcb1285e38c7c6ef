//! Genre suggester backed by TMDB.

use std::sync::{Arc, RwLock};
use std::time::Instant;

use async_trait::async_trait;
use tracing::{debug, error, info};

use super::traits::{GenreSuggester, SuggesterError};
use super::types::{resolve_genre, Confidence, GenreSuggestion};
use crate::external_catalog::{
    ExternalCatalogError, MovieCatalog, TmdbClient, TmdbConfig, TmdbMovie,
};
use crate::metrics;

/// Popularity above which a TMDB match is considered a confident one.
const HIGH_CONFIDENCE_POPULARITY: f64 = 10.0;

enum CatalogSource {
    Config(TmdbConfig),
    Prebuilt(Arc<dyn MovieCatalog>),
}

/// Looks a title up on TMDB and returns the primary genre of the best match.
pub struct TmdbGenreSuggester {
    source: CatalogSource,
    catalog: RwLock<Option<Arc<dyn MovieCatalog>>>,
}

impl TmdbGenreSuggester {
    /// A suggester that builds its TMDB client on `initialize`.
    pub fn new(config: TmdbConfig) -> Self {
        Self {
            source: CatalogSource::Config(config),
            catalog: RwLock::new(None),
        }
    }

    /// A suggester over an existing catalog client.
    pub fn with_catalog(catalog: Arc<dyn MovieCatalog>) -> Self {
        Self {
            source: CatalogSource::Prebuilt(catalog),
            catalog: RwLock::new(None),
        }
    }

    fn current_catalog(&self) -> Option<Arc<dyn MovieCatalog>> {
        self.catalog.read().ok().and_then(|guard| guard.clone())
    }

    async fn lookup(
        &self,
        catalog: &dyn MovieCatalog,
        title: &str,
        valid_genres: &[String],
    ) -> Result<GenreSuggestion, ExternalCatalogError> {
        let results = catalog.search_movies(title).await?;

        let Some(best) = results.into_iter().next() else {
            return Ok(GenreSuggestion::undetermined(
                Confidence::Low,
                format!("No movies found matching '{}'", title),
            ));
        };

        let details = catalog.get_movie(best.id).await?;
        debug!(
            "TMDB match for '{}': '{}' ({} genres)",
            title,
            details.title,
            details.genres.len()
        );

        let Some(primary_genre) = details.genres.first() else {
            return Ok(GenreSuggestion::undetermined(
                Confidence::Low,
                format!("No genres found for '{}'", title),
            ));
        };

        let genre = resolve_genre(primary_genre, valid_genres);
        Ok(GenreSuggestion::success(genre, confidence_for(&best)).with_message(format!(
            "Found '{}' ({})",
            details.title,
            details.release_year_label()
        )))
    }
}

fn confidence_for(movie: &TmdbMovie) -> Confidence {
    if movie.popularity.unwrap_or(0.0) > HIGH_CONFIDENCE_POPULARITY {
        Confidence::High
    } else {
        Confidence::Medium
    }
}

#[async_trait]
impl GenreSuggester for TmdbGenreSuggester {
    fn name(&self) -> &str {
        "TMDB"
    }

    async fn initialize(&self) -> Result<(), SuggesterError> {
        let catalog: Arc<dyn MovieCatalog> = match &self.source {
            CatalogSource::Config(config) => {
                if !config.has_credentials() {
                    return Err(SuggesterError::NotConfigured(
                        "No TMDB API key provided".to_string(),
                    ));
                }
                let client = TmdbClient::new(config.clone()).map_err(|e| {
                    SuggesterError::InitFailed {
                        backend: "TMDB".to_string(),
                        message: e.to_string(),
                    }
                })?;
                Arc::new(client)
            }
            CatalogSource::Prebuilt(catalog) => Arc::clone(catalog),
        };

        if let Ok(mut guard) = self.catalog.write() {
            *guard = Some(catalog);
        }
        info!("TMDB genre suggester initialized");
        Ok(())
    }

    async fn suggest(&self, title: &str, valid_genres: &[String]) -> GenreSuggestion {
        let Some(catalog) = self.current_catalog() else {
            return GenreSuggestion::error("TMDB client not initialized. Call initialize() first");
        };

        let start = Instant::now();
        let suggestion = match self.lookup(catalog.as_ref(), title, valid_genres).await {
            Ok(suggestion) => suggestion,
            Err(e) => {
                error!("TMDB API error for '{}': {}", title, e);
                GenreSuggestion::error(e.to_string())
            }
        };
        metrics::record_suggestion("tmdb", &suggestion, start.elapsed());
        suggestion
    }

    async fn cleanup(&self) {
        if let Ok(mut guard) = self.catalog.write() {
            *guard = None;
        }
    }
}
