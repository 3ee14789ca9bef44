use std::sync::Arc;

use tracing::{debug, error, info};

use super::types::{HistoryRequest, HistoryWindow, RawMessage};
use super::MessagingApi;

/// Messages gathered for a window.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    /// Messages in API order.
    pub messages: Vec<RawMessage>,
    /// Number of pages successfully read.
    pub pages: u32,
    /// Set when collection stopped early because of an API error.
    pub interrupted: Option<String>,
}

impl Collection {
    pub fn is_partial(&self) -> bool {
        self.interrupted.is_some()
    }
}

/// Walks every history page of one channel.
pub struct MessageCollector {
    api: Arc<dyn MessagingApi>,
    channel_id: String,
    page_size: u32,
}

impl MessageCollector {
    pub fn new(api: Arc<dyn MessagingApi>, channel_id: impl Into<String>, page_size: u32) -> Self {
        Self {
            api,
            channel_id: channel_id.into(),
            page_size,
        }
    }

    /// Collect every message in `window`.
    ///
    /// Follows `next_cursor` until the API reports no more pages. An API
    /// error ends the walk and keeps whatever was already gathered.
    pub async fn collect(&self, window: &HistoryWindow) -> Collection {
        info!(
            channel = %self.channel_id,
            from = %window.oldest.format("%Y-%m-%d"),
            to = %window.latest.format("%Y-%m-%d"),
            "Fetching channel history"
        );

        let mut collection = Collection::default();
        let mut cursor: Option<String> = None;

        loop {
            let request = HistoryRequest {
                channel: self.channel_id.clone(),
                oldest: window.oldest_ts(),
                latest: window.latest_ts(),
                limit: self.page_size,
                cursor: cursor.take(),
            };

            let page = match self.api.conversations_history(&request).await {
                Ok(page) => page,
                Err(e) => {
                    error!(
                        channel = %self.channel_id,
                        page = collection.pages + 1,
                        error = %e,
                        "Channel history request failed, keeping partial results"
                    );
                    collection.interrupted = Some(e.to_string());
                    break;
                }
            };

            collection.pages += 1;
            debug!(
                page = collection.pages,
                messages = page.messages.len(),
                has_more = page.has_more,
                "History page received"
            );
            collection.messages.extend(page.messages);

            match page.next_cursor {
                Some(next) if page.has_more => cursor = Some(next),
                _ => break,
            }
        }

        collection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messaging::{HistoryPage, MessagingError};
    use crate::testing::MockMessagingApi;
    use chrono::{TimeZone, Utc};

    fn window() -> HistoryWindow {
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 0, 0, 0).unwrap();
        HistoryWindow::trailing_days(now, 7).unwrap()
    }

    fn page(texts: &[&str], next: Option<&str>) -> HistoryPage {
        HistoryPage {
            messages: texts.iter().map(|t| RawMessage::new("1.0", *t)).collect(),
            has_more: next.is_some(),
            next_cursor: next.map(String::from),
        }
    }

    #[tokio::test]
    async fn test_collect_follows_cursors() {
        let api = Arc::new(MockMessagingApi::new());
        api.push_page(page(&["a", "b"], Some("c1"))).await;
        api.push_page(page(&["c"], Some("c2"))).await;
        api.push_page(page(&["d"], None)).await;

        let collector = MessageCollector::new(api.clone(), "C1", 2);
        let collection = collector.collect(&window()).await;

        let texts: Vec<_> = collection.messages.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c", "d"]);
        assert_eq!(collection.pages, 3);
        assert!(!collection.is_partial());

        let requests = api.recorded_requests().await;
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].cursor, None);
        assert_eq!(requests[1].cursor.as_deref(), Some("c1"));
        assert_eq!(requests[2].cursor.as_deref(), Some("c2"));
        assert!(requests.iter().all(|r| r.channel == "C1" && r.limit == 2));
        assert_eq!(requests[0].oldest, window().oldest_ts());
    }

    #[tokio::test]
    async fn test_collect_keeps_partial_results_on_error() {
        let api = Arc::new(MockMessagingApi::new());
        api.push_page(page(&["a"], Some("c1"))).await;
        api.push_error(MessagingError::Api("ratelimited".to_string()))
            .await;
        api.push_page(page(&["never"], None)).await;

        let collector = MessageCollector::new(api.clone(), "C1", 200);
        let collection = collector.collect(&window()).await;

        assert_eq!(collection.messages.len(), 1);
        assert_eq!(collection.pages, 1);
        assert!(collection.is_partial());
        assert_eq!(api.request_count().await, 2);
    }

    #[tokio::test]
    async fn test_collect_stops_when_has_more_without_cursor() {
        let api = Arc::new(MockMessagingApi::new());
        api.push_page(HistoryPage {
            messages: vec![RawMessage::new("1.0", "x")],
            has_more: true,
            next_cursor: None,
        })
        .await;

        let collector = MessageCollector::new(api.clone(), "C1", 200);
        let collection = collector.collect(&window()).await;

        assert_eq!(collection.messages.len(), 1);
        assert_eq!(api.request_count().await, 1);
    }

    #[tokio::test]
    async fn test_collect_empty_channel() {
        let api = Arc::new(MockMessagingApi::new());
        let collector = MessageCollector::new(api, "C1", 200);
        let collection = collector.collect(&window()).await;
        assert!(collection.messages.is_empty());
        assert_eq!(collection.pages, 1);
    }
}
