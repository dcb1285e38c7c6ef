//! Genre suggester backed by a chat model, with an optional fallback.

use std::sync::{Arc, RwLock};
use std::time::Instant;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use super::prompt::{system_prompt, user_prompt, PromptStrategy};
use super::reply::{parse_reply, ParsedReply};
use super::traits::{GenreSuggester, SuggesterError};
use super::types::{resolve_genre, GenreSuggestion, SuggestionStatus};
use crate::llm::{create_llm_client, CompletionRequest, LlmClient, LlmConfig};
use crate::metrics;

enum ClientSource {
    Config(LlmConfig),
    Prebuilt(Arc<dyn LlmClient>),
}

/// Asks a model to clean the title and pick a genre.
///
/// When the model gives no usable genre and a fallback is attached, the
/// fallback is queried with the model's cleaned title. A successful fallback
/// answer replaces the model's, with a note saying where it came from.
pub struct LlmGenreSuggester {
    source: ClientSource,
    client: RwLock<Option<Arc<dyn LlmClient>>>,
    strategy: PromptStrategy,
    max_tokens: u32,
    temperature: f32,
    fallback: Option<Arc<dyn GenreSuggester>>,
}

impl LlmGenreSuggester {
    /// A suggester that builds its client from `config` on `initialize`.
    pub fn new(config: LlmConfig) -> Self {
        let max_tokens = config.max_tokens;
        let temperature = config.temperature;
        Self {
            source: ClientSource::Config(config),
            client: RwLock::new(None),
            strategy: PromptStrategy::default(),
            max_tokens,
            temperature,
            fallback: None,
        }
    }

    /// A suggester over an existing client.
    pub fn with_client(client: Arc<dyn LlmClient>) -> Self {
        let defaults = LlmConfig::default();
        Self {
            source: ClientSource::Prebuilt(client),
            client: RwLock::new(None),
            strategy: PromptStrategy::default(),
            max_tokens: defaults.max_tokens,
            temperature: defaults.temperature,
            fallback: None,
        }
    }

    pub fn with_strategy(mut self, strategy: PromptStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Attach a suggester to consult when the model is inconclusive.
    pub fn with_fallback(mut self, fallback: Arc<dyn GenreSuggester>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn fallback(&self) -> Option<&Arc<dyn GenreSuggester>> {
        self.fallback.as_ref()
    }

    fn current_client(&self) -> Option<Arc<dyn LlmClient>> {
        self.client.read().ok().and_then(|guard| guard.clone())
    }

    async fn ask_model(
        &self,
        client: &dyn LlmClient,
        title: &str,
        valid_genres: &[String],
    ) -> GenreSuggestion {
        let request = CompletionRequest::new(user_prompt(title))
            .with_system(system_prompt(self.strategy, valid_genres))
            .with_max_tokens(self.max_tokens)
            .with_temperature(self.temperature);

        let response = match client.complete(request).await {
            Ok(response) => response,
            Err(e) => {
                error!("{} request failed for '{}': {}", client.provider(), title, e);
                return GenreSuggestion::error(e.to_string());
            }
        };

        debug!("Model reply for '{}':\n{}", title, response.text);
        let reply = parse_reply(&response.text);

        match reply.usable_genre() {
            Some(genre) => {
                let genre = resolve_genre(genre, valid_genres);
                info!(
                    "Model suggested '{}' for {} ({} confidence)",
                    genre,
                    reply.title_label(title),
                    reply.confidence
                );
                GenreSuggestion::success(genre, reply.confidence)
            }
            None => self.inconclusive(&reply, title, valid_genres).await,
        }
    }

    async fn inconclusive(
        &self,
        reply: &ParsedReply,
        title: &str,
        valid_genres: &[String],
    ) -> GenreSuggestion {
        let label = reply.title_label(title);
        let undetermined = || {
            GenreSuggestion::undetermined(
                reply.confidence,
                format!("Unable to determine genre for {}", label),
            )
        };

        let (Some(fallback), Some(lookup_title)) = (&self.fallback, reply.clean_title.as_deref())
        else {
            return undetermined();
        };

        info!(
            "Model could not classify {}, asking {}",
            label,
            fallback.name()
        );
        let suggestion = fallback.suggest(lookup_title, valid_genres).await;

        if suggestion.status() == SuggestionStatus::Success {
            metrics::FALLBACK_ATTEMPTS.with_label_values(&["used"]).inc();
            suggestion.with_message_prefix(&format!("Using {} data for {}: ", fallback.name(), label))
        } else {
            warn!(
                "{} was inconclusive for {}: {}",
                fallback.name(),
                label,
                suggestion.message().unwrap_or("no details")
            );
            metrics::FALLBACK_ATTEMPTS
                .with_label_values(&["inconclusive"])
                .inc();
            undetermined()
        }
    }
}

#[async_trait]
impl GenreSuggester for LlmGenreSuggester {
    fn name(&self) -> &str {
        "LLM"
    }

    async fn initialize(&self) -> Result<(), SuggesterError> {
        let client = match &self.source {
            ClientSource::Config(config) => {
                if !config.has_credentials() {
                    return Err(SuggesterError::NotConfigured(
                        "No LLM API key provided".to_string(),
                    ));
                }
                create_llm_client(config).map_err(|e| SuggesterError::InitFailed {
                    backend: "LLM".to_string(),
                    message: e.to_string(),
                })?
            }
            ClientSource::Prebuilt(client) => Arc::clone(client),
        };

        info!(
            "LLM genre suggester initialized ({} / {})",
            client.provider(),
            client.model()
        );
        if let Ok(mut guard) = self.client.write() {
            *guard = Some(client);
        }
        Ok(())
    }

    async fn suggest(&self, title: &str, valid_genres: &[String]) -> GenreSuggestion {
        let Some(client) = self.current_client() else {
            return GenreSuggestion::error("LLM client not initialized. Call initialize() first");
        };

        let start = Instant::now();
        let suggestion = self.ask_model(client.as_ref(), title, valid_genres).await;
        metrics::record_suggestion(client.provider(), &suggestion, start.elapsed());
        suggestion
    }

    async fn cleanup(&self) {
        if let Ok(mut guard) = self.client.write() {
            *guard = None;
        }
        if let Some(fallback) = &self.fallback {
            fallback.cleanup().await;
        }
    }
}
