use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use crate::llm::LlmProvider;
use crate::suggester::{PromptStrategy, SuggesterConfig};

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub library: LibraryConfig,
    #[serde(default)]
    pub suggester: SuggesterConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    5001
}

/// Library document location
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LibraryConfig {
    #[serde(default = "default_library_path")]
    pub path: PathBuf,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            path: default_library_path(),
        }
    }
}

fn default_library_path() -> PathBuf {
    PathBuf::from("config.json")
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub library: LibraryConfig,
    pub suggester: SanitizedSuggesterConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedSuggesterConfig {
    pub timeout_secs: u32,
    pub max_concurrent: usize,
    pub prompt_strategy: PromptStrategy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm: Option<SanitizedLlmConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tmdb: Option<SanitizedTmdbConfig>,
}

/// Sanitized LLM config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedLlmConfig {
    pub provider: LlmProvider,
    pub model: String,
    pub api_key_configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    pub timeout_secs: u32,
}

/// Sanitized TMDB config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedTmdbConfig {
    pub api_key_configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        let suggester = &config.suggester;
        Self {
            server: config.server.clone(),
            library: config.library.clone(),
            suggester: SanitizedSuggesterConfig {
                timeout_secs: suggester.timeout_secs,
                max_concurrent: suggester.max_concurrent,
                prompt_strategy: suggester.prompt_strategy,
                llm: suggester.llm.as_ref().map(|l| SanitizedLlmConfig {
                    provider: l.provider,
                    model: l.model.clone(),
                    api_key_configured: l
                        .api_key
                        .as_deref()
                        .is_some_and(|k| !k.trim().is_empty()),
                    api_base: l.api_base.clone(),
                    timeout_secs: l.timeout_secs,
                }),
                tmdb: suggester.tmdb.as_ref().map(|t| SanitizedTmdbConfig {
                    api_key_configured: t.has_credentials(),
                    base_url: t.base_url.clone(),
                }),
            },
        }
    }
}
