//! Mock channel history for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::messaging::{HistoryPage, HistoryRequest, MessagingApi, MessagingError};

/// Mock implementation of the MessagingApi trait.
///
/// Serves queued pages (or errors) in order, one per request, and records
/// every request. Once the queue is empty it answers with an empty last
/// page.
///
/// # Example
///
/// ```rust,ignore
/// use change_report_core::testing::{fixtures, MockMessagingApi};
///
/// let api = MockMessagingApi::new();
/// api.push_page(fixtures::page(&["deploying OPS-1"], None)).await;
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockMessagingApi {
    responses: Arc<RwLock<VecDeque<Result<HistoryPage, MessagingError>>>>,
    requests: Arc<RwLock<Vec<HistoryRequest>>>,
}

impl MockMessagingApi {
    /// Create a new mock with no queued pages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a page.
    pub async fn push_page(&self, page: HistoryPage) {
        self.responses.write().await.push_back(Ok(page));
    }

    /// Queue a failure.
    pub async fn push_error(&self, error: MessagingError) {
        self.responses.write().await.push_back(Err(error));
    }

    /// Get all recorded requests.
    pub async fn recorded_requests(&self) -> Vec<HistoryRequest> {
        self.requests.read().await.clone()
    }

    /// Get the number of requests performed.
    pub async fn request_count(&self) -> usize {
        self.requests.read().await.len()
    }
}

#[async_trait]
impl MessagingApi for MockMessagingApi {
    async fn conversations_history(
        &self,
        request: &HistoryRequest,
    ) -> Result<HistoryPage, MessagingError> {
        self.requests.write().await.push(request.clone());

        self.responses
            .write()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(HistoryPage::default()))
    }
}
