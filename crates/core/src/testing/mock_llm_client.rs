//! Mock LLM client for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::llm::{CompletionRequest, CompletionResponse, LlmClient, LlmError, LlmUsage};

/// Mock implementation of the LlmClient trait.
///
/// Replies are queued with [`push_reply`](Self::push_reply) and handed out in
/// order. With nothing queued, `complete` fails with an empty-response error.
///
/// # Example
///
/// ```rust,ignore
/// use cinesort_core::testing::MockLlmClient;
///
/// let client = MockLlmClient::new();
/// client.push_reply("TITLE: Heat\nSELECTED_GENRE: Crime\nCONFIDENCE: High").await;
///
/// let response = client.complete(CompletionRequest::new("...")).await?;
/// assert_eq!(client.recorded_requests().await.len(), 1);
/// ```
#[derive(Debug)]
pub struct MockLlmClient {
    /// Queued reply texts.
    replies: Arc<RwLock<VecDeque<String>>>,
    /// Recorded requests.
    requests: Arc<RwLock<Vec<CompletionRequest>>>,
    /// If set, the next call will fail with this error.
    next_error: Arc<RwLock<Option<LlmError>>>,
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLlmClient {
    /// Create a mock with no queued replies.
    pub fn new() -> Self {
        Self {
            replies: Arc::new(RwLock::new(VecDeque::new())),
            requests: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Queue a reply text.
    pub async fn push_reply(&self, text: &str) {
        self.replies.write().await.push_back(text.to_string());
    }

    /// Make the next call fail with the given error.
    pub async fn set_next_error(&self, error: LlmError) {
        *self.next_error.write().await = Some(error);
    }

    /// Get all recorded requests.
    pub async fn recorded_requests(&self) -> Vec<CompletionRequest> {
        self.requests.read().await.clone()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    fn provider(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.requests.write().await.push(request);

        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        let text = self
            .replies
            .write()
            .await
            .pop_front()
            .ok_or_else(|| LlmError::EmptyResponse("mock".to_string()))?;

        Ok(CompletionResponse {
            text,
            usage: LlmUsage::default(),
            model: "mock-model".to_string(),
        })
    }
}
