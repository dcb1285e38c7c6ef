use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::{Path, PathBuf};
use tracing::info;

use super::{types::Config, ConfigError};

/// Config file used when `CINESORT_CONFIG` is not set.
pub const DEFAULT_CONFIG_PATH: &str = "cinesort.toml";

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "CINESORT_CONFIG";

/// Older variable names still honoured, with the key each one sets.
const LEGACY_ENV: &[(&str, &str)] = &[
    ("MOVIE_ORGANIZER_OPENAI_API_TOKEN", "suggester.llm.api_key"),
    ("MOVIE_ORGANIZER_TMDB_API_KEY", "suggester.tmdb.api_key"),
];

/// Path of the config file to load.
pub fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Load configuration from file with environment variable overrides.
///
/// A missing file means defaults. `CINESORT_SECTION__KEY` variables
/// override both the file and the legacy variables.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let mut figment = Figment::new();
    if path.exists() {
        figment = figment.merge(Toml::file(path));
    } else {
        info!("No config file at {}, using defaults", path.display());
    }

    for (var, key) in LEGACY_ENV {
        figment = figment.merge(Env::raw().only(&[*var]).map(move |_| (*key).into()));
    }

    let config: Config = figment
        .merge(Env::prefixed("CINESORT_").split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}
