//! Parser for the fixed-field reply the model is asked to produce.
//!
//! ```text
//! TITLE: The Matrix
//! YEAR: 1999
//! SELECTED_GENRE: SciFi
//! CONFIDENCE: High
//! ```
//!
//! Fields may come in any order, may be missing, and may be surrounded by
//! commentary. Each line is looked at on its own; nothing here can fail.

use super::types::Confidence;

const TITLE: &str = "TITLE:";
const YEAR: &str = "YEAR:";
const SELECTED_GENRE: &str = "SELECTED_GENRE:";
const CONFIDENCE: &str = "CONFIDENCE:";

/// Fields recovered from a model reply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedReply {
    pub clean_title: Option<String>,
    pub year: Option<String>,
    pub genre: Option<String>,
    pub confidence: Confidence,
}

impl ParsedReply {
    /// The genre, unless it is missing or the model said `N/A`.
    pub fn usable_genre(&self) -> Option<&str> {
        self.genre
            .as_deref()
            .filter(|g| !g.eq_ignore_ascii_case("N/A"))
    }

    /// `'Title (Year)'`, or `'Title'` when no year was given.
    pub fn title_label(&self, fallback_title: &str) -> String {
        let title = self.clean_title.as_deref().unwrap_or(fallback_title);
        match &self.year {
            Some(year) => format!("'{} ({})'", title, year),
            None => format!("'{}'", title),
        }
    }
}

/// Scan `text` line by line for the labelled fields.
///
/// Later occurrences of a label overwrite earlier ones.
pub fn parse_reply(text: &str) -> ParsedReply {
    let mut reply = ParsedReply::default();

    for line in text.lines() {
        let line = line.trim();
        if let Some(value) = field(line, TITLE) {
            reply.clean_title = non_empty(value);
        } else if let Some(value) = field(line, YEAR) {
            reply.year = non_empty(value).filter(|y| !y.eq_ignore_ascii_case("N/A"));
        } else if let Some(value) = field(line, SELECTED_GENRE) {
            reply.genre = non_empty(value);
        } else if let Some(value) = field(line, CONFIDENCE) {
            reply.confidence = Confidence::parse_lenient(value);
        }
    }

    reply
}

fn field<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    line.strip_prefix(label).map(str::trim)
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
