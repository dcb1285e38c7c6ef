//! The suggester capability shared by every backend.

use async_trait::async_trait;
use thiserror::Error;

use super::types::GenreSuggestion;

/// Errors raised outside of `suggest`.
///
/// `suggest` itself never fails; only start-up can.
#[derive(Debug, Error)]
pub enum SuggesterError {
    /// No credential, or an unusable one, was configured.
    #[error("Suggester not configured: {0}")]
    NotConfigured(String),

    /// The backend client could not be built.
    #[error("Failed to initialize {backend}: {message}")]
    InitFailed { backend: String, message: String },
}

/// A backend that can propose a genre for a movie title.
#[async_trait]
pub trait GenreSuggester: Send + Sync {
    /// Short backend name, used in logs and provenance messages (e.g. "TMDB").
    fn name(&self) -> &str;

    /// Acquire the client. Fails fast when no credential is configured.
    async fn initialize(&self) -> Result<(), SuggesterError>;

    /// Propose a genre for `title`, preferring entries of `valid_genres`.
    ///
    /// Failures are reported as a result with status `error`.
    async fn suggest(&self, title: &str, valid_genres: &[String]) -> GenreSuggestion;

    /// Drop the client. Safe to call repeatedly or before `initialize`.
    async fn cleanup(&self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SuggesterError::NotConfigured("No TMDB API key provided".to_string());
        assert_eq!(
            err.to_string(),
            "Suggester not configured: No TMDB API key provided"
        );

        let err = SuggesterError::InitFailed {
            backend: "openai".to_string(),
            message: "bad tls".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to initialize openai: bad tls");
    }
}
