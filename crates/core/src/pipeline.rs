//! End-to-end report run.
//!
//! Stages run strictly in order: collect history, extract keys, resolve
//! tickets, lay out the document. Writing happens only once every lookup has
//! finished.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::info;

use crate::config::Config;
use crate::messaging::{
    Collection, HistoryWindow, MessageCollector, MessagingApi, WindowOutOfRange,
};
use crate::report::{group_by_status, ReportDocument, ReportError, ReportWriter};
use crate::tickets::{extract_keys, SkippedTicket, TicketEnricher, TicketKey, TicketingApi};

/// Failures that abort a run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Window(#[from] WindowOutOfRange),

    #[error(transparent)]
    Report(#[from] ReportError),
}

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct ChangeReport {
    pub window: HistoryWindow,
    pub messages_scanned: usize,
    /// Set when history collection stopped early.
    pub collection_error: Option<String>,
    pub keys: BTreeSet<TicketKey>,
    pub skipped: Vec<SkippedTicket>,
    pub document: ReportDocument,
}

impl ChangeReport {
    pub fn record_count(&self) -> usize {
        self.document.record_count()
    }
}

/// Wires collector, enricher and layout together.
pub struct ReportPipeline {
    collector: MessageCollector,
    enricher: TicketEnricher,
    lookback_days: u32,
    title: String,
    success_statuses: BTreeSet<String>,
}

impl ReportPipeline {
    pub fn new(
        messaging: Arc<dyn MessagingApi>,
        ticketing: Arc<dyn TicketingApi>,
        config: &Config,
    ) -> Self {
        Self {
            collector: MessageCollector::new(
                messaging,
                config.slack.channel_id.clone(),
                config.slack.page_size,
            ),
            enricher: TicketEnricher::new(ticketing, &config.jira),
            lookback_days: config.slack.lookback_days,
            title: config.report.title.clone(),
            success_statuses: config.report.success_statuses.clone(),
        }
    }

    /// Collect, resolve and lay out the report for the window ending at `now`.
    pub async fn build(&self, now: DateTime<Utc>) -> Result<ChangeReport, PipelineError> {
        let window = HistoryWindow::trailing_days(now, self.lookback_days)?;

        let Collection {
            messages,
            interrupted,
            ..
        } = self.collector.collect(&window).await;

        info!(messages = messages.len(), "Extracting ticket keys");
        let keys = extract_keys(&messages);
        info!(tickets = keys.len(), "Found unique tickets");

        let enrichment = self.enricher.enrich_all(&keys).await;

        let grouped = group_by_status(enrichment.records);
        let document = ReportDocument::build(&self.title, &grouped, &self.success_statuses);

        Ok(ChangeReport {
            window,
            messages_scanned: messages.len(),
            collection_error: interrupted,
            keys,
            skipped: enrichment.skipped,
            document,
        })
    }

    /// Build the report and write it to `path`.
    ///
    /// Collection and lookup failures are reflected in the returned
    /// [`ChangeReport`]; an unusable window or a failed write is an error.
    pub async fn run(
        &self,
        now: DateTime<Utc>,
        writer: &ReportWriter,
        path: &Path,
    ) -> Result<ChangeReport, PipelineError> {
        let report = self.build(now).await?;

        info!(
            sections = report.document.sections.len(),
            records = report.record_count(),
            "Writing report grouped by status"
        );
        writer.write(&report.document, path)?;

        Ok(report)
    }
}
