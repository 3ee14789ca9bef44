use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::config::{CustomFieldIds, JiraConfig};

use super::decode::decode_issue;
use super::key::TicketKey;
use super::types::TicketRecord;
use super::{TicketingApi, TicketingError};

/// A key that produced no record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedTicket {
    pub key: TicketKey,
    pub reason: String,
}

/// Result of resolving a batch of keys.
#[derive(Debug, Clone, Default)]
pub struct Enrichment {
    /// Resolved records, ordered by key.
    pub records: Vec<TicketRecord>,
    /// Keys dropped because the lookup failed, ordered by key.
    pub skipped: Vec<SkippedTicket>,
}

/// Resolves ticket keys into records through a [`TicketingApi`].
pub struct TicketEnricher {
    api: Arc<dyn TicketingApi>,
    fields: CustomFieldIds,
    max_parallel_lookups: usize,
    lookup_timeout: Duration,
}

impl TicketEnricher {
    pub fn new(api: Arc<dyn TicketingApi>, config: &JiraConfig) -> Self {
        Self {
            api,
            fields: config.fields.clone(),
            max_parallel_lookups: config.max_parallel_lookups.max(1),
            lookup_timeout: Duration::from_secs(config.lookup_timeout_secs),
        }
    }

    /// Look up a single key.
    pub async fn enrich(&self, key: &TicketKey) -> Result<TicketRecord, TicketingError> {
        let issue = tokio::time::timeout(self.lookup_timeout, self.api.get_issue(key))
            .await
            .map_err(|_| TicketingError::Timeout(self.lookup_timeout.as_secs()))??;

        Ok(decode_issue(key, &issue, &self.fields))
    }

    /// Look up every key with bounded concurrency.
    ///
    /// Returns only after every lookup has finished. Failed lookups are
    /// logged and reported in [`Enrichment::skipped`].
    pub async fn enrich_all(&self, keys: &BTreeSet<TicketKey>) -> Enrichment {
        debug!(
            count = keys.len(),
            max_parallel = self.max_parallel_lookups,
            "Resolving ticket keys"
        );

        let results: Vec<(TicketKey, Result<TicketRecord, TicketingError>)> =
            stream::iter(keys.iter().cloned())
                .map(|key| async move {
                    info!(key = %key, "Fetching ticket");
                    let result = self.enrich(&key).await;
                    (key, result)
                })
                .buffer_unordered(self.max_parallel_lookups)
                .collect()
                .await;

        let mut enrichment = Enrichment::default();
        for (key, result) in results {
            match result {
                Ok(record) => enrichment.records.push(record),
                Err(e) => {
                    warn!(key = %key, error = %e, "Skipping ticket");
                    enrichment.skipped.push(SkippedTicket {
                        key,
                        reason: e.to_string(),
                    });
                }
            }
        }

        enrichment.records.sort_by(|a, b| a.key.cmp(&b.key));
        enrichment.skipped.sort_by(|a, b| a.key.cmp(&b.key));
        enrichment
    }
}
