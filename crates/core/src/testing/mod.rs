//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of the backend traits, so the
//! suggestion pipeline and the HTTP API can be tested without network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use cinesort_core::testing::{MockLlmClient, MockMovieCatalog, fixtures};
//!
//! let client = MockLlmClient::new();
//! client.push_reply("TITLE: Heat\nYEAR: 1995\nSELECTED_GENRE: N/A").await;
//!
//! let catalog = MockMovieCatalog::new();
//! catalog.add_movie(fixtures::tmdb_movie(949, "Heat", "1995-12-15", &["Crime"], 40.0)).await;
//! ```

mod mock_llm_client;
mod mock_movie_catalog;
mod mock_suggester;

pub use mock_llm_client::MockLlmClient;
pub use mock_movie_catalog::{MockMovieCatalog, RecordedCatalogQuery};
pub use mock_suggester::{MockSuggester, RecordedSuggestion};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::external_catalog::TmdbMovie;

    /// Create a TMDB movie record. An empty `release_date` means unknown.
    pub fn tmdb_movie(
        id: u32,
        title: &str,
        release_date: &str,
        genres: &[&str],
        popularity: f64,
    ) -> TmdbMovie {
        TmdbMovie {
            id,
            title: title.to_string(),
            release_date: (!release_date.is_empty()).then(|| release_date.to_string()),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            popularity: Some(popularity),
        }
    }

    /// A model reply in the expected four-line format.
    pub fn llm_reply(title: &str, year: Option<u32>, genre: &str, confidence: &str) -> String {
        let year = year.map_or_else(|| "N/A".to_string(), |y| y.to_string());
        format!(
            "TITLE: {}\nYEAR: {}\nSELECTED_GENRE: {}\nCONFIDENCE: {}",
            title, year, genre, confidence
        )
    }
}
