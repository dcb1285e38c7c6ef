use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Suggester limits are at least 1
/// - LLM section (model, temperature, timeout) when present
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.library.path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "library.path cannot be empty".to_string(),
        ));
    }

    config
        .suggester
        .validate()
        .map_err(ConfigError::ValidationError)?;

    Ok(())
}
