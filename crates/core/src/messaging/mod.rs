//! Channel history collection.
//!
//! This module provides a `MessagingApi` trait over the Slack Web API
//! `conversations.history` method and a collector that walks every page of
//! a time window.

mod collector;
mod slack;
mod types;

pub use collector::{Collection, MessageCollector};
pub use slack::SlackClient;
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when reading channel history.
#[derive(Debug, Error)]
pub enum MessagingError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded, please wait before retrying")]
    RateLimited,

    /// API answered with `ok: false` or a non-success status.
    #[error("API error: {0}")]
    Api(String),

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// Read access to a channel's message history.
#[async_trait]
pub trait MessagingApi: Send + Sync {
    /// Fetch one page of history.
    async fn conversations_history(
        &self,
        request: &HistoryRequest,
    ) -> Result<HistoryPage, MessagingError>;
}
