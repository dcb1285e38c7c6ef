//! Prompts for the LLM suggester.

use serde::{Deserialize, Serialize};

/// How hard the model is pushed toward reusing the known genres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptStrategy {
    /// Reuse a known genre whenever one is a reasonable fit.
    #[default]
    PreferKnown,
    /// Treat the known genres as hints; suggest a new one more readily.
    AllowNew,
}

const FORMAT_AND_EXAMPLES: &str = r#"Format your response EXACTLY like this:
TITLE: [cleaned movie title]
YEAR: [year if found, or N/A if not found]
SELECTED_GENRE: [one genre, or N/A if you cannot tell]
CONFIDENCE: [High/Medium/Low]

Example outputs:
For "The.Matrix.1999.1080p.BluRay.x264":
TITLE: The Matrix
YEAR: 1999
SELECTED_GENRE: SciFi
CONFIDENCE: High

For "Some.Unknown.Movie.2024.WEBRip":
TITLE: Some Unknown Movie
YEAR: 2024
SELECTED_GENRE: N/A
CONFIDENCE: Low

For "The.Godfather.1972.BluRay":
TITLE: The Godfather
YEAR: 1972
SELECTED_GENRE: Drama
CONFIDENCE: High"#;

/// System prompt: task description, reply format and the genre guidance.
pub fn system_prompt(strategy: PromptStrategy, valid_genres: &[String]) -> String {
    let genres_list = if valid_genres.is_empty() {
        "(none yet)".to_string()
    } else {
        valid_genres.join(", ")
    };

    let guidance = match strategy {
        PromptStrategy::PreferKnown => format!(
            "IMPORTANT: For SELECTED_GENRE, choose one of these existing genres whenever it is a \
             reasonable fit: {genres_list}\n\
             Only if none of them fits at all may you suggest a new genre. \
             When suggesting a new genre, keep it short, specific and consistent."
        ),
        PromptStrategy::AllowNew => format!(
            "For SELECTED_GENRE, prefer using these existing genres when they fit well: \
             {genres_list}\n\
             If none of these genres are a good match, you may suggest a new genre. \
             When suggesting a new genre, be specific and consistent."
        ),
    };

    format!(
        "You are a movie expert who can clean up movie filenames and determine genres.\n\
         Given a movie filename, first extract the actual title and year, then determine its \
         genre.\n\n{FORMAT_AND_EXAMPLES}\n\n{guidance}\n"
    )
}

/// User prompt carrying the title to classify.
pub fn user_prompt(title: &str) -> String {
    format!(
        "Movie filename: \"{}\"\n\nPlease clean up this movie title and determine its genre \
         from the available genres.",
        title
    )
}
