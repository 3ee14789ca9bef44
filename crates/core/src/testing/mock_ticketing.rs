//! Mock Jira issue API for testing.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::tickets::{TicketKey, TicketingApi, TicketingError};

/// Mock implementation of the TicketingApi trait.
///
/// Provides controllable behavior for testing:
/// - Return configured issue documents by key
/// - Answer unknown keys with `NotFound` (like a Jira 404)
/// - Fail a specific key once
/// - Delay every lookup
/// - Track lookups for assertions
#[derive(Debug, Clone, Default)]
pub struct MockTicketingApi {
    /// Issue documents by key.
    issues: Arc<RwLock<HashMap<String, Value>>>,
    /// One-shot failures by key.
    failures: Arc<RwLock<HashMap<String, TicketingError>>>,
    /// Delay applied before answering.
    latency: Arc<RwLock<Option<Duration>>>,
    /// Keys looked up, in call order.
    lookups: Arc<RwLock<Vec<TicketKey>>>,
}

impl MockTicketingApi {
    /// Create a new empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an issue document; it is stored under its `"key"` field.
    pub async fn add_issue(&self, issue: Value) {
        let key = issue
            .get("key")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        self.issues.write().await.insert(key, issue);
    }

    /// Make the next lookup of `key` fail with `error`.
    pub async fn fail_key(&self, key: &str, error: TicketingError) {
        self.failures.write().await.insert(key.to_string(), error);
    }

    /// Delay every lookup by `latency`.
    pub async fn set_latency(&self, latency: Duration) {
        *self.latency.write().await = Some(latency);
    }

    /// Get all looked-up keys.
    pub async fn recorded_lookups(&self) -> Vec<TicketKey> {
        self.lookups.read().await.clone()
    }

    /// Get the number of lookups performed.
    pub async fn lookup_count(&self) -> usize {
        self.lookups.read().await.len()
    }
}

#[async_trait]
impl TicketingApi for MockTicketingApi {
    async fn get_issue(&self, key: &TicketKey) -> Result<Value, TicketingError> {
        self.lookups.write().await.push(key.clone());

        let latency = *self.latency.read().await;
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        if let Some(err) = self.failures.write().await.remove(key.as_str()) {
            return Err(err);
        }

        self.issues
            .read()
            .await
            .get(key.as_str())
            .cloned()
            .ok_or_else(|| TicketingError::NotFound(key.to_string()))
    }
}
