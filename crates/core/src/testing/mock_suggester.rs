//! Mock genre suggester for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::suggester::{Confidence, GenreSuggester, GenreSuggestion, SuggesterError};

/// A recorded `suggest` call for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedSuggestion {
    pub title: String,
    pub valid_genres: Vec<String>,
}

/// Mock implementation of the GenreSuggester trait.
///
/// Provides controllable behavior for testing:
/// - Return queued suggestions in order
/// - Track calls for assertions
/// - Simulate slow backends
///
/// With nothing queued, `suggest` answers `undetermined`.
#[derive(Debug)]
pub struct MockSuggester {
    name: String,
    /// Queued results.
    suggestions: Arc<RwLock<VecDeque<GenreSuggestion>>>,
    /// Recorded calls.
    calls: Arc<RwLock<Vec<RecordedSuggestion>>>,
    /// Delay before each answer.
    delay: Arc<RwLock<Option<Duration>>>,
    cleanups: Arc<RwLock<usize>>,
}

impl MockSuggester {
    /// Create a mock reporting `name` as its backend name.
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            suggestions: Arc::new(RwLock::new(VecDeque::new())),
            calls: Arc::new(RwLock::new(Vec::new())),
            delay: Arc::new(RwLock::new(None)),
            cleanups: Arc::new(RwLock::new(0)),
        }
    }

    /// Queue a result for a later `suggest` call.
    pub async fn push_suggestion(&self, suggestion: GenreSuggestion) {
        self.suggestions.write().await.push_back(suggestion);
    }

    /// Wait this long before answering.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = Some(delay);
    }

    /// Titles passed to `suggest`, in call order.
    pub async fn recorded_titles(&self) -> Vec<String> {
        self.calls.read().await.iter().map(|c| c.title.clone()).collect()
    }

    /// Genre lists passed to `suggest`, in call order.
    pub async fn recorded_genres(&self) -> Vec<Vec<String>> {
        self.calls
            .read()
            .await
            .iter()
            .map(|c| c.valid_genres.clone())
            .collect()
    }

    /// Number of `cleanup` calls.
    pub async fn cleanup_count(&self) -> usize {
        *self.cleanups.read().await
    }
}

#[async_trait]
impl GenreSuggester for MockSuggester {
    fn name(&self) -> &str {
        &self.name
    }

    async fn initialize(&self) -> Result<(), SuggesterError> {
        Ok(())
    }

    async fn suggest(&self, title: &str, valid_genres: &[String]) -> GenreSuggestion {
        self.calls.write().await.push(RecordedSuggestion {
            title: title.to_string(),
            valid_genres: valid_genres.to_vec(),
        });

        let delay = *self.delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.suggestions
            .write()
            .await
            .pop_front()
            .unwrap_or_else(|| {
                GenreSuggestion::undetermined(Confidence::Low, format!("No canned suggestion for '{}'", title))
            })
    }

    async fn cleanup(&self) {
        *self.cleanups.write().await += 1;
    }
}
