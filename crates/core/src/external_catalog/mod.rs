//! External movie catalog integration (TMDB).
//!
//! The genre suggester only needs two calls: a title search and a detail
//! fetch by id. They sit behind [`MovieCatalog`] so tests can swap in a mock.

mod tmdb;
mod types;

pub use tmdb::{TmdbClient, TmdbConfig};
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when interacting with external catalogs.
#[derive(Debug, Error)]
pub enum ExternalCatalogError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded, please wait before retrying")]
    RateLimitExceeded,

    /// Resource not found (404).
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Client not configured (missing API key, etc.).
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

/// A searchable movie database.
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    /// Search for movies by title, most relevant first.
    async fn search_movies(&self, query: &str) -> Result<Vec<TmdbMovie>, ExternalCatalogError>;

    /// Get the full record of a movie, including its genres.
    async fn get_movie(&self, tmdb_id: u32) -> Result<TmdbMovie, ExternalCatalogError>;
}
