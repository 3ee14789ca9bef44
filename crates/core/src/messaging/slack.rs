//! Slack Web API client for `conversations.history`.
//!
//! Slack reports most failures as HTTP 200 with `ok: false`, so both the
//! status code and the envelope are checked.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::SlackConfig;

use super::types::{HistoryPage, HistoryRequest, RawMessage};
use super::{MessagingApi, MessagingError};

const DEFAULT_BASE_URL: &str = "https://slack.com/api";

/// Slack Web API client.
pub struct SlackClient {
    client: Client,
    base_url: String,
    bot_token: String,
}

impl SlackClient {
    /// Create a new Slack client.
    pub fn new(config: &SlackConfig) -> Result<Self, MessagingError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            bot_token: config.bot_token.clone(),
        })
    }
}

#[async_trait]
impl MessagingApi for SlackClient {
    async fn conversations_history(
        &self,
        request: &HistoryRequest,
    ) -> Result<HistoryPage, MessagingError> {
        let url = format!("{}/conversations.history", self.base_url);

        debug!(
            channel = %request.channel,
            cursor = ?request.cursor,
            "Slack conversations.history"
        );

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.bot_token)
            .query(&history_query(request))
            .send()
            .await?;

        let status = response.status();
        if status == 429 {
            return Err(MessagingError::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MessagingError::Api(format!(
                "HTTP {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        let envelope: SlackHistoryResponse = response.json().await.map_err(|e| {
            MessagingError::ParseError(format!("Failed to parse history response: {}", e))
        })?;

        envelope.into_page()
    }
}

/// Query string for one page. `inclusive` is left unset, so messages exactly
/// at either bound are excluded.
fn history_query(request: &HistoryRequest) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("channel", request.channel.clone()),
        ("oldest", request.oldest.clone()),
        ("latest", request.latest.clone()),
        ("limit", request.limit.to_string()),
    ];
    if let Some(cursor) = &request.cursor {
        query.push(("cursor", cursor.clone()));
    }
    query
}

// ============================================================================
// Slack API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct SlackHistoryResponse {
    ok: bool,
    error: Option<String>,
    #[serde(default)]
    messages: Vec<SlackMessage>,
    #[serde(default)]
    has_more: bool,
    response_metadata: Option<SlackResponseMetadata>,
}

#[derive(Debug, Deserialize)]
struct SlackMessage {
    ts: Option<String>,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SlackResponseMetadata {
    next_cursor: Option<String>,
}

impl SlackHistoryResponse {
    fn into_page(self) -> Result<HistoryPage, MessagingError> {
        if !self.ok {
            return Err(MessagingError::Api(
                self.error.unwrap_or_else(|| "unknown_error".to_string()),
            ));
        }

        let next_cursor = self
            .response_metadata
            .and_then(|m| m.next_cursor)
            .filter(|c| !c.is_empty());

        Ok(HistoryPage {
            messages: self.messages.into_iter().map(RawMessage::from).collect(),
            has_more: self.has_more,
            next_cursor,
        })
    }
}

impl From<SlackMessage> for RawMessage {
    fn from(m: SlackMessage) -> Self {
        Self {
            ts: m.ts.unwrap_or_default(),
            text: m.text.unwrap_or_default(),
        }
    }
}
