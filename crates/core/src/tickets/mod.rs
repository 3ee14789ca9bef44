//! Ticket reference extraction and Jira enrichment.
//!
//! Keys are pulled out of channel messages, each key is resolved through the
//! Jira issue API, and the raw field bag is decoded into a flat
//! [`TicketRecord`].

mod decode;
mod enricher;
mod jira;
mod key;
mod types;

pub use decode::decode_issue;
pub use enricher::{Enrichment, SkippedTicket, TicketEnricher};
pub use jira::JiraClient;
pub use key::{extract_keys, InvalidTicketKey, TicketKey};
pub use types::*;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur when reading an issue.
#[derive(Debug, Error)]
pub enum TicketingError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Issue does not exist or is not visible (404).
    #[error("Issue not found: {0}")]
    NotFound(String),

    /// Credentials rejected (401/403).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded, please wait before retrying")]
    RateLimited,

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Lookup did not finish in time.
    #[error("Lookup timed out after {0}s")]
    Timeout(u64),
}

/// Read access to issues by key.
#[async_trait]
pub trait TicketingApi: Send + Sync {
    /// Fetch one issue; returns the raw JSON document (`{"key", "fields": {...}}`).
    async fn get_issue(&self, key: &TicketKey) -> Result<Value, TicketingError>;
}
