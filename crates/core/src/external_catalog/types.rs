//! Types for external catalog API responses.

use serde::{Deserialize, Serialize};

/// A TMDB movie.
///
/// Search results carry `popularity` but no genres; detail records carry
/// the ordered genre list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TmdbMovie {
    /// TMDB movie ID.
    pub id: u32,
    /// Movie title.
    pub title: String,
    /// Release date (YYYY-MM-DD), may be empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    /// Genre names, most relevant first.
    #[serde(default)]
    pub genres: Vec<String>,
    /// TMDB popularity score.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popularity: Option<f64>,
}

impl TmdbMovie {
    /// First four characters of the release date, or "" when unknown.
    pub fn release_year_label(&self) -> &str {
        let date = self.release_date.as_deref().unwrap_or("");
        match date.char_indices().nth(4) {
            Some((end, _)) => &date[..end],
            None => date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(release_date: Option<&str>) -> TmdbMovie {
        TmdbMovie {
            id: 1,
            title: "Test Movie".to_string(),
            release_date: release_date.map(String::from),
            genres: vec![],
            popularity: None,
        }
    }

    #[test]
    fn test_release_year_label_tolerates_short_dates() {
        assert_eq!(movie(Some("1999-03-31")).release_year_label(), "1999");
        assert_eq!(movie(Some("")).release_year_label(), "");
        assert_eq!(movie(Some("19")).release_year_label(), "19");
        assert_eq!(movie(None).release_year_label(), "");
    }
}
