//! TMDB (The Movie Database) API client.
//!
//! TMDB requires an API key, passed as the `api_key` query parameter.
//! Rate limits are generous (around 40 requests per second).

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::TmdbMovie;
use super::{ExternalCatalogError, MovieCatalog};
use crate::metrics;

const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// TMDB API client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    /// TMDB API key (required).
    #[serde(default)]
    pub api_key: String,
    /// Base URL (default: https://api.themoviedb.org/3).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

fn default_timeout() -> u32 {
    30
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self::new("")
    }
}

impl TmdbConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
            timeout_secs: default_timeout(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Whether an API key is set.
    pub fn has_credentials(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

/// TMDB API client.
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    /// Create a new TMDB client.
    pub fn new(config: TmdbConfig) -> Result<Self, ExternalCatalogError> {
        if config.api_key.is_empty() {
            return Err(ExternalCatalogError::NotConfigured(
                "TMDB API key is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key,
        })
    }

    async fn check_status(response: Response, what: &str) -> Result<Response, ExternalCatalogError> {
        let status = response.status();
        if status == 401 {
            return Err(ExternalCatalogError::NotConfigured(
                "Invalid TMDB API key".to_string(),
            ));
        }
        if status == 404 {
            return Err(ExternalCatalogError::NotFound(what.to_string()));
        }
        if status == 429 {
            return Err(ExternalCatalogError::RateLimitExceeded);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExternalCatalogError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }
        Ok(response)
    }

    async fn fetch_search(&self, query: &str) -> Result<Vec<TmdbMovie>, ExternalCatalogError> {
        let url = format!("{}/search/movie", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("query", query),
                ("include_adult", "false"),
            ])
            .send()
            .await?;
        let response = Self::check_status(response, "search/movie").await?;

        let search_result: TmdbSearchResponse = response.json().await.map_err(|e| {
            ExternalCatalogError::ParseError(format!(
                "Failed to parse movie search response: {}",
                e
            ))
        })?;

        Ok(search_result
            .results
            .into_iter()
            .map(|r| r.into())
            .collect())
    }

    async fn fetch_movie(&self, tmdb_id: u32) -> Result<TmdbMovie, ExternalCatalogError> {
        let url = format!("{}/movie/{}", self.base_url, tmdb_id);

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;
        let response = Self::check_status(response, &format!("Movie ID {}", tmdb_id)).await?;

        let movie: TmdbMovieDetails = response.json().await.map_err(|e| {
            ExternalCatalogError::ParseError(format!("Failed to parse movie response: {}", e))
        })?;

        Ok(movie.into())
    }
}

#[async_trait]
impl MovieCatalog for TmdbClient {
    async fn search_movies(&self, query: &str) -> Result<Vec<TmdbMovie>, ExternalCatalogError> {
        debug!("TMDB movie search: query='{}'", query);
        let start = Instant::now();
        let result = self.fetch_search(query).await;
        metrics::record_external_call("tmdb", "search", result.is_ok(), start.elapsed());
        result
    }

    async fn get_movie(&self, tmdb_id: u32) -> Result<TmdbMovie, ExternalCatalogError> {
        debug!("TMDB get movie: id={}", tmdb_id);
        let start = Instant::now();
        let result = self.fetch_movie(tmdb_id).await;
        metrics::record_external_call("tmdb", "movie", result.is_ok(), start.elapsed());
        result
    }
}

// ============================================================================
// TMDB API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct TmdbSearchResponse {
    #[serde(default)]
    results: Vec<TmdbMovieResult>,
}

#[derive(Debug, Deserialize)]
struct TmdbMovieResult {
    id: u32,
    #[serde(default)]
    title: String,
    release_date: Option<String>,
    popularity: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct TmdbMovieDetails {
    id: u32,
    #[serde(default)]
    title: String,
    release_date: Option<String>,
    #[serde(default)]
    genres: Vec<TmdbGenre>,
    popularity: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct TmdbGenre {
    name: String,
}

impl From<TmdbMovieResult> for TmdbMovie {
    fn from(r: TmdbMovieResult) -> Self {
        Self {
            id: r.id,
            title: r.title,
            release_date: r.release_date,
            genres: vec![], // Not available in search results
            popularity: r.popularity,
        }
    }
}

impl From<TmdbMovieDetails> for TmdbMovie {
    fn from(d: TmdbMovieDetails) -> Self {
        Self {
            id: d.id,
            title: d.title,
            release_date: d.release_date,
            genres: d.genres.into_iter().map(|g| g.name).collect(),
            popularity: d.popularity,
        }
    }
}
