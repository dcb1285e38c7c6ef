//! Common test utilities for API testing with mocks.
//!
//! This module provides a test fixture that creates an in-process router
//! backed by a temporary library document and a mock genre suggester, so
//! the whole HTTP surface can be exercised without network access.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use cinesort_core::{
    config::LibraryConfig, testing::MockSuggester, Config, GenreService, GenreSuggester,
    LibraryStore, SuggesterConfig,
};
use cinesort_server::{api::create_router, state::AppState};

/// Test fixture for API testing with a mock suggester.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_health() {
///     let fixture = TestFixture::new().await;
///     let response = fixture.get("/api/v1/health").await;
///     assert_eq!(response.status, StatusCode::OK);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock suggester - queue suggestions, inspect calls
    pub suggester: Arc<MockSuggester>,
    /// Store behind the router
    pub store: LibraryStore,
    /// Holds the library document and movie folders
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub text: String,
}

impl TestFixture {
    /// Create a fixture whose service uses a mock suggester.
    pub async fn new() -> Self {
        Self::build(true).await
    }

    /// Create a fixture with no suggester configured.
    pub async fn without_suggester() -> Self {
        Self::build(false).await
    }

    async fn build(with_suggester: bool) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let library_path = temp_dir.path().join("config.json");

        let config = Config {
            library: LibraryConfig {
                path: library_path.clone(),
            },
            ..Default::default()
        };

        let suggester = Arc::new(MockSuggester::named("mock"));
        let store = LibraryStore::new(library_path);
        let service = GenreService::new(
            with_suggester.then(|| Arc::clone(&suggester) as Arc<dyn GenreSuggester>),
            store.clone(),
            &SuggesterConfig::default(),
        );

        let state = Arc::new(AppState::new(config, service));
        let router = create_router(state);

        Self {
            router,
            suggester,
            store,
            temp_dir,
        }
    }

    /// Create a movie folder under the temp dir and return its path.
    pub fn movie_folder(&self, name: &str) -> PathBuf {
        let folder = self.temp_dir.path().join(name);
        std::fs::create_dir_all(&folder).expect("Failed to create movie folder");
        folder
    }

    /// Create an empty file (and its parents) under `folder`.
    pub fn touch(&self, folder: &Path, relative: &str) -> PathBuf {
        let path = folder.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        std::fs::write(&path, b"movie").expect("Failed to write file");
        path
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a PUT request with JSON body.
    pub async fn put(&self, path: &str, body: Value) -> TestResponse {
        self.request("PUT", path, Some(body)).await
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let text = String::from_utf8_lossy(&body_bytes).into_owned();
        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body, text }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status, $response.status, $response.text
        );
    };
}
