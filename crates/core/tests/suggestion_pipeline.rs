//! Suggestion pipeline integration tests.
//!
//! These tests drive `GenreService` end to end with mock backends:
//! - Title cleaning and genre loading before the suggester is called
//! - LLM answers, including stored-casing resolution
//! - Fallback to TMDB when the model is inconclusive
//! - Failures surfacing as error results
//! - The concurrency bound

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cinesort_core::{
    external_catalog::{ExternalCatalogError, TmdbConfig},
    suggester::{LlmGenreSuggester, TmdbGenreSuggester},
    testing::{fixtures, MockLlmClient, MockMovieCatalog, MockSuggester},
    Confidence, GenreService, GenreSuggester, GenreSuggestion, LibraryStore, SuggesterConfig,
    SuggestionStatus,
};

/// LLM suggester with a TMDB fallback, both backed by mocks.
struct TestHarness {
    service: GenreService,
    llm: Arc<MockLlmClient>,
    catalog: Arc<MockMovieCatalog>,
    _temp_dir: TempDir,
}

impl TestHarness {
    async fn new(genres: &[&str]) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = LibraryStore::new(temp_dir.path().join("config.json"));
        let genres: Vec<String> = genres.iter().map(|g| g.to_string()).collect();
        store
            .configure(&[], &genres)
            .await
            .expect("Failed to write library");

        let llm = Arc::new(MockLlmClient::new());
        let catalog = Arc::new(MockMovieCatalog::new());

        let fallback = TmdbGenreSuggester::with_catalog(Arc::clone(&catalog) as _);
        fallback.initialize().await.expect("fallback init");
        let suggester = LlmGenreSuggester::with_client(Arc::clone(&llm) as _)
            .with_fallback(Arc::new(fallback));
        suggester.initialize().await.expect("suggester init");

        let service = GenreService::new(
            Some(Arc::new(suggester)),
            store,
            &SuggesterConfig::default(),
        );

        Self {
            service,
            llm,
            catalog,
            _temp_dir: temp_dir,
        }
    }
}

fn assert_consistent(suggestion: &GenreSuggestion) {
    assert_eq!(
        suggestion.status() == SuggestionStatus::Success,
        suggestion.genre().is_some(),
        "status and genre disagree: {suggestion:?}"
    );
}

#[tokio::test]
async fn test_matrix_release_name() {
    let harness = TestHarness::new(&["SciFi", "Drama"]).await;
    harness
        .llm
        .push_reply(&fixtures::llm_reply("The Matrix", Some(1999), "SciFi", "High"))
        .await;

    let suggestion = harness
        .service
        .suggest_genre_for_movie("The.Matrix.1999.1080p.BluRay.x264.mkv")
        .await;

    assert_consistent(&suggestion);
    assert_eq!(suggestion.status(), SuggestionStatus::Success);
    assert_eq!(suggestion.genre(), Some("SciFi"));
    assert_eq!(suggestion.confidence(), Confidence::High);

    let requests = harness.llm.recorded_requests().await;
    assert!(requests[0].prompt.contains("\"The Matrix (1999)\""));
    assert!(harness.catalog.recorded_queries().await.is_empty());
}

#[tokio::test]
async fn test_stored_casing_wins() {
    let harness = TestHarness::new(&["Drama", "SciFi"]).await;
    harness
        .llm
        .push_reply(&fixtures::llm_reply("Heat", Some(1995), "DRAMA", "Medium"))
        .await;

    let suggestion = harness.service.suggest_genre_for_movie("Heat.1995.mkv").await;
    assert_eq!(suggestion.genre(), Some("Drama"));
}

#[tokio::test]
async fn test_inconclusive_model_uses_tmdb() {
    let harness = TestHarness::new(&["Crime", "Drama"]).await;
    harness
        .llm
        .push_reply(&fixtures::llm_reply("Heat", Some(1995), "N/A", "Low"))
        .await;
    harness
        .catalog
        .add_movie(fixtures::tmdb_movie(
            949,
            "Heat",
            "1995-12-15",
            &["crime", "Drama", "Thriller"],
            52.3,
        ))
        .await;

    let suggestion = harness
        .service
        .suggest_genre_for_movie("/downloads/Heat.1995.720p.mkv")
        .await;

    assert_consistent(&suggestion);
    assert_eq!(suggestion.genre(), Some("Crime"));
    assert_eq!(suggestion.confidence(), Confidence::High);
    assert_eq!(
        suggestion.message(),
        Some("Using TMDB data for 'Heat (1995)': Found 'Heat' (1995)")
    );
}

#[tokio::test]
async fn test_no_match_anywhere_is_undetermined() {
    let harness = TestHarness::new(&["Drama"]).await;
    harness
        .llm
        .push_reply(&fixtures::llm_reply("Obscure Home Video", None, "N/A", "Low"))
        .await;

    let suggestion = harness
        .service
        .suggest_genre_for_movie("obscure_home_video.avi")
        .await;

    assert_consistent(&suggestion);
    assert_eq!(suggestion.status(), SuggestionStatus::Undetermined);
    assert_eq!(suggestion.confidence(), Confidence::Low);
    assert_eq!(
        suggestion.message(),
        Some("Unable to determine genre for 'Obscure Home Video'")
    );
}

#[tokio::test]
async fn test_fallback_failure_keeps_model_result() {
    let harness = TestHarness::new(&["Drama"]).await;
    harness
        .llm
        .push_reply(&fixtures::llm_reply("Heat", Some(1995), "N/A", "Medium"))
        .await;
    harness
        .catalog
        .set_next_error(ExternalCatalogError::RateLimitExceeded)
        .await;

    let suggestion = harness.service.suggest_genre_for_movie("Heat.1995.mkv").await;
    assert_eq!(suggestion.status(), SuggestionStatus::Undetermined);
    assert_eq!(suggestion.confidence(), Confidence::Medium);
}

#[tokio::test]
async fn test_model_failure_is_error_result() {
    let harness = TestHarness::new(&["Drama"]).await;
    // nothing queued: the mock fails with an empty response

    let suggestion = harness.service.suggest_genre_for_movie("Heat.1995.mkv").await;
    assert_consistent(&suggestion);
    assert_eq!(suggestion.status(), SuggestionStatus::Error);
    assert_eq!(suggestion.confidence(), Confidence::Low);
    assert_eq!(suggestion.message(), Some("Empty response from mock"));
}

#[tokio::test]
async fn test_tmdb_only_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .and(query_param("query", "Alien (1979)"))
        .and(query_param("api_key", "tmdb-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"id": 348, "title": "Alien", "popularity": 4.2}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/movie/348"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 348,
            "title": "Alien",
            "release_date": "1979-05-25",
            "genres": [{"id": 27, "name": "Horror"}, {"id": 878, "name": "Science Fiction"}]
        })))
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let config = SuggesterConfig {
        tmdb: Some(TmdbConfig::new("tmdb-key").with_base_url(server.uri())),
        ..Default::default()
    };
    let service = GenreService::from_config(
        &config,
        LibraryStore::new(temp_dir.path().join("config.json")),
    )
    .await;
    assert_eq!(service.suggester_name(), Some("TMDB"));

    let suggestion = service.suggest_genre_for_movie("Alien.1979.DVDRip.avi").await;
    assert_eq!(suggestion.genre(), Some("Horror"));
    assert_eq!(suggestion.confidence(), Confidence::Medium);
    assert_eq!(suggestion.message(), Some("Found 'Alien' (1979)"));
}

#[tokio::test]
async fn test_tmdb_server_error_is_error_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream broke"))
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let config = SuggesterConfig {
        tmdb: Some(TmdbConfig::new("tmdb-key").with_base_url(server.uri())),
        ..Default::default()
    };
    let service = GenreService::from_config(
        &config,
        LibraryStore::new(temp_dir.path().join("config.json")),
    )
    .await;

    let suggestion = service.suggest_genre_for_movie("Heat.mkv").await;
    assert_consistent(&suggestion);
    assert_eq!(suggestion.status(), SuggestionStatus::Error);
    assert_eq!(suggestion.message(), Some("API error: 500 - upstream broke"));
}

#[tokio::test]
async fn test_calls_past_the_limit_wait() {
    let temp_dir = TempDir::new().unwrap();
    let suggester = Arc::new(MockSuggester::named("slow"));
    suggester.set_delay(Duration::from_millis(200)).await;

    let config = SuggesterConfig {
        max_concurrent: 1,
        ..Default::default()
    };
    let service = Arc::new(GenreService::new(
        Some(Arc::clone(&suggester) as Arc<dyn GenreSuggester>),
        LibraryStore::new(temp_dir.path().join("config.json")),
        &config,
    ));

    let start = Instant::now();
    let first = tokio::spawn({
        let service = Arc::clone(&service);
        async move { service.suggest_genre_for_movie("One.mkv").await }
    });
    let second = tokio::spawn({
        let service = Arc::clone(&service);
        async move { service.suggest_genre_for_movie("Two.mkv").await }
    });
    first.await.unwrap();
    second.await.unwrap();

    assert!(start.elapsed() >= Duration::from_millis(400));
    assert_eq!(suggester.recorded_titles().await.len(), 2);
}
