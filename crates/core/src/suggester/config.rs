//! Suggester configuration.

use serde::{Deserialize, Serialize};

use super::prompt::PromptStrategy;
use crate::external_catalog::TmdbConfig;
use crate::llm::LlmConfig;

/// Which backends to build and how calls to them are bounded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggesterConfig {
    /// Upper bound on one suggestion call, fallback included.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
    /// Suggestion calls allowed in flight at once.
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,
    #[serde(default)]
    pub prompt_strategy: PromptStrategy,
    /// Primary backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm: Option<LlmConfig>,
    /// Secondary backend, or the only one when no LLM is configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tmdb: Option<TmdbConfig>,
}

fn default_timeout() -> u32 {
    90
}

fn default_max_concurrent() -> usize {
    3
}

impl Default for SuggesterConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            max_concurrent: default_max_concurrent(),
            prompt_strategy: PromptStrategy::default(),
            llm: None,
            tmdb: None,
        }
    }
}

impl SuggesterConfig {
    /// The LLM section, if it carries a usable credential.
    pub fn configured_llm(&self) -> Option<&LlmConfig> {
        self.llm.as_ref().filter(|llm| llm.has_credentials())
    }

    /// The TMDB section, if it carries an API key.
    pub fn configured_tmdb(&self) -> Option<&TmdbConfig> {
        self.tmdb.as_ref().filter(|tmdb| tmdb.has_credentials())
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_secs == 0 {
            return Err("suggester.timeout_secs must be at least 1".to_string());
        }
        if self.max_concurrent == 0 {
            return Err("suggester.max_concurrent must be at least 1".to_string());
        }
        if let Some(llm) = &self.llm {
            llm.validate()?;
        }
        Ok(())
    }
}
