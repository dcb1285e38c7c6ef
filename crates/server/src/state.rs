use cinesort_core::{Config, GenreService, LibraryStore, SanitizedConfig};

/// Shared application state
pub struct AppState {
    config: Config,
    service: GenreService,
}

impl AppState {
    pub fn new(config: Config, service: GenreService) -> Self {
        Self { config, service }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn service(&self) -> &GenreService {
        &self.service
    }

    pub fn store(&self) -> &LibraryStore {
        self.service.store()
    }
}
