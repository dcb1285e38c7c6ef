//! Genre suggestion.
//!
//! Two backends implement [`GenreSuggester`]:
//!
//! - [`LlmGenreSuggester`] asks a chat model to clean the title and pick a
//!   genre, and can delegate to a fallback when the model is inconclusive.
//! - [`TmdbGenreSuggester`] looks the title up on TMDB and takes the primary
//!   genre of the best match.
//!
//! Every outcome, failures included, comes back as a [`GenreSuggestion`].

mod config;
mod llm;
mod prompt;
mod reply;
mod tmdb;
mod traits;
mod types;

pub use config::SuggesterConfig;
pub use llm::LlmGenreSuggester;
pub use prompt::{system_prompt, user_prompt, PromptStrategy};
pub use reply::{parse_reply, ParsedReply};
pub use tmdb::TmdbGenreSuggester;
pub use traits::{GenreSuggester, SuggesterError};
pub use types::{resolve_genre, Confidence, GenreSuggestion, SuggestionStatus};

use std::sync::Arc;

use tracing::{info, warn};

use crate::llm::LlmConfig;
use crate::external_catalog::TmdbConfig;

/// Build and initialize the suggester chain described by `config`.
///
/// An LLM with credentials becomes the primary, with TMDB as its fallback
/// when TMDB has a key. TMDB alone is used when only it is configured.
/// Returns `None` when nothing is configured or initialization fails.
pub async fn build_suggester(config: &SuggesterConfig) -> Option<Arc<dyn GenreSuggester>> {
    let tmdb = config.configured_tmdb().cloned();

    let suggester: Arc<dyn GenreSuggester> = match config.configured_llm() {
        Some(llm) => Arc::new(llm_suggester(llm.clone(), config.prompt_strategy, tmdb).await),
        None => match tmdb {
            Some(tmdb) => Arc::new(TmdbGenreSuggester::new(tmdb)),
            None => {
                warn!("No genre suggester configured");
                return None;
            }
        },
    };

    match suggester.initialize().await {
        Ok(()) => {
            info!("Genre suggester ready: {}", suggester.name());
            Some(suggester)
        }
        Err(e) => {
            warn!("Genre suggester disabled: {}", e);
            None
        }
    }
}

async fn llm_suggester(
    llm: LlmConfig,
    strategy: PromptStrategy,
    tmdb: Option<TmdbConfig>,
) -> LlmGenreSuggester {
    let suggester = LlmGenreSuggester::new(llm).with_strategy(strategy);
    let Some(tmdb) = tmdb else {
        return suggester;
    };

    let fallback = TmdbGenreSuggester::new(tmdb);
    match fallback.initialize().await {
        Ok(()) => suggester.with_fallback(Arc::new(fallback)),
        Err(e) => {
            warn!("TMDB fallback disabled: {}", e);
            suggester
        }
    }
}
