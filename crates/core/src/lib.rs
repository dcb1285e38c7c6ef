pub mod config;
pub mod external_catalog;
pub mod library;
pub mod llm;
pub mod metrics;
pub mod service;
pub mod suggester;
pub mod testing;
pub mod title;

pub use config::{
    config_path, load_config, load_config_from_str, validate_config, Config, ConfigError,
    SanitizedConfig,
};
pub use library::{LibraryDocument, LibraryError, LibraryStore, MovieFile};
pub use service::{GenreService, NOT_CONFIGURED_MESSAGE};
pub use suggester::{
    build_suggester, Confidence, GenreSuggester, GenreSuggestion, SuggesterConfig,
    SuggesterError, SuggestionStatus,
};
pub use title::clean_title;
