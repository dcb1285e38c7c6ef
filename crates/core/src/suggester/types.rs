//! Result types for genre suggestion.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How sure a backend is about a proposed genre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Confidence {
    High,
    Medium,
    #[default]
    Low,
}

impl Confidence {
    /// Parse a confidence label as written by a model.
    ///
    /// Matching is case-insensitive; anything unrecognised is `Low`.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" => Confidence::High,
            "medium" => Confidence::Medium,
            _ => Confidence::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "High",
            Confidence::Medium => "Medium",
            Confidence::Low => "Low",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome tag of a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionStatus {
    /// A genre was determined.
    Success,
    /// The backend answered but gave no usable genre.
    Undetermined,
    /// Transport, parsing or configuration failure.
    Error,
}

impl SuggestionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionStatus::Success => "success",
            SuggestionStatus::Undetermined => "undetermined",
            SuggestionStatus::Error => "error",
        }
    }
}

impl fmt::Display for SuggestionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One genre proposal.
///
/// A genre is present exactly when the status is [`SuggestionStatus::Success`].
/// The constructors are the only way to build a value, so the invariant holds
/// on every path, including fallback substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreSuggestion {
    genre: Option<String>,
    confidence: Confidence,
    status: SuggestionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl GenreSuggestion {
    /// A determined genre.
    pub fn success(genre: impl Into<String>, confidence: Confidence) -> Self {
        Self {
            genre: Some(genre.into()),
            confidence,
            status: SuggestionStatus::Success,
            message: None,
        }
    }

    /// The backend answered, but without a usable genre.
    pub fn undetermined(confidence: Confidence, message: impl Into<String>) -> Self {
        Self {
            genre: None,
            confidence,
            status: SuggestionStatus::Undetermined,
            message: Some(message.into()),
        }
    }

    /// A failure captured as data. Confidence is always `Low`.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            genre: None,
            confidence: Confidence::Low,
            status: SuggestionStatus::Error,
            message: Some(message.into()),
        }
    }

    /// Attach a human-readable note.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Put `prefix` in front of the existing message (absent counts as empty).
    pub fn with_message_prefix(mut self, prefix: &str) -> Self {
        let rest = self.message.take().unwrap_or_default();
        self.message = Some(format!("{}{}", prefix, rest));
        self
    }

    pub fn genre(&self) -> Option<&str> {
        self.genre.as_deref()
    }

    pub fn confidence(&self) -> Confidence {
        self.confidence
    }

    pub fn status(&self) -> SuggestionStatus {
        self.status
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_success(&self) -> bool {
        self.status == SuggestionStatus::Success
    }
}

/// Find `candidate` in the known genres, ignoring case.
///
/// Returns the stored spelling on a match, otherwise the candidate unchanged
/// (a new genre).
pub fn resolve_genre(candidate: &str, valid_genres: &[String]) -> String {
    valid_genres
        .iter()
        .find(|known| known.to_lowercase() == candidate.to_lowercase())
        .cloned()
        .unwrap_or_else(|| candidate.to_string())
}
