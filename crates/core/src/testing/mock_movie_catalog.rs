//! Mock movie catalog for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::external_catalog::{ExternalCatalogError, MovieCatalog, TmdbMovie};

/// A recorded catalog query for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCatalogQuery {
    SearchMovies { query: String },
    GetMovie { tmdb_id: u32 },
}

/// Mock implementation of the MovieCatalog trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable movies (search matches titles by substring)
/// - Track queries for assertions
/// - Simulate failures
///
/// # Example
///
/// ```rust,ignore
/// use cinesort_core::testing::{MockMovieCatalog, fixtures};
///
/// let catalog = MockMovieCatalog::new();
/// catalog.add_movie(fixtures::tmdb_movie(949, "Heat", "1995-12-15", &["Crime"], 40.0)).await;
///
/// let results = catalog.search_movies("heat").await?;
/// assert_eq!(results.len(), 1);
/// ```
#[derive(Debug)]
pub struct MockMovieCatalog {
    /// Movies in insertion order, which is also search ranking order.
    movies: Arc<RwLock<Vec<TmdbMovie>>>,
    /// Recorded queries.
    queries: Arc<RwLock<Vec<RecordedCatalogQuery>>>,
    /// If set, the next operation will fail with this error.
    next_error: Arc<RwLock<Option<ExternalCatalogError>>>,
}

impl Default for MockMovieCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMovieCatalog {
    /// Create a new empty mock catalog.
    pub fn new() -> Self {
        Self {
            movies: Arc::new(RwLock::new(Vec::new())),
            queries: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Add a movie, replacing any with the same id.
    pub async fn add_movie(&self, movie: TmdbMovie) {
        let mut movies = self.movies.write().await;
        movies.retain(|m| m.id != movie.id);
        movies.push(movie);
    }

    /// Replace all movies.
    pub async fn set_movies(&self, movies: Vec<TmdbMovie>) {
        *self.movies.write().await = movies;
    }

    /// Get all recorded queries.
    pub async fn recorded_queries(&self) -> Vec<RecordedCatalogQuery> {
        self.queries.read().await.clone()
    }

    /// Make the next operation fail with the given error.
    pub async fn set_next_error(&self, error: ExternalCatalogError) {
        *self.next_error.write().await = Some(error);
    }

    async fn take_error(&self) -> Option<ExternalCatalogError> {
        self.next_error.write().await.take()
    }

    async fn record(&self, query: RecordedCatalogQuery) {
        self.queries.write().await.push(query);
    }
}

#[async_trait]
impl MovieCatalog for MockMovieCatalog {
    async fn search_movies(&self, query: &str) -> Result<Vec<TmdbMovie>, ExternalCatalogError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        self.record(RecordedCatalogQuery::SearchMovies {
            query: query.to_string(),
        })
        .await;

        let query_lower = query.to_lowercase();
        let results = self
            .movies
            .read()
            .await
            .iter()
            .filter(|m| query_lower.contains(&m.title.to_lowercase()))
            .map(|m| TmdbMovie {
                // search hits carry no genres
                genres: Vec::new(),
                ..m.clone()
            })
            .collect();

        Ok(results)
    }

    async fn get_movie(&self, tmdb_id: u32) -> Result<TmdbMovie, ExternalCatalogError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        self.record(RecordedCatalogQuery::GetMovie { tmdb_id }).await;

        self.movies
            .read()
            .await
            .iter()
            .find(|m| m.id == tmdb_id)
            .cloned()
            .ok_or_else(|| ExternalCatalogError::NotFound(format!("Movie {} not found", tmdb_id)))
    }
}
