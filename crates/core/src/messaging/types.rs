use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A channel message as returned by the history API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMessage {
    /// Slack message timestamp (`"1718000000.000100"`).
    #[serde(default)]
    pub ts: String,
    /// Message body; absent for some bot/attachment-only messages.
    #[serde(default)]
    pub text: String,
}

impl RawMessage {
    pub fn new(ts: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            ts: ts.into(),
            text: text.into(),
        }
    }
}

/// A lookback that starts before the earliest representable time.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("Lookback of {0} days reaches outside the supported date range")]
pub struct WindowOutOfRange(pub u32);

/// Time range to collect. Slack treats both bounds as exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryWindow {
    pub oldest: DateTime<Utc>,
    pub latest: DateTime<Utc>,
}

impl HistoryWindow {
    /// Window of `days` days ending at `now`.
    pub fn trailing_days(now: DateTime<Utc>, days: u32) -> Result<Self, WindowOutOfRange> {
        let oldest = now
            .checked_sub_signed(Duration::days(i64::from(days)))
            .ok_or(WindowOutOfRange(days))?;
        Ok(Self {
            oldest,
            latest: now,
        })
    }

    pub fn oldest_ts(&self) -> String {
        slack_timestamp(self.oldest)
    }

    pub fn latest_ts(&self) -> String {
        slack_timestamp(self.latest)
    }
}

/// Format a time as a Slack epoch timestamp (`<secs>.<micros>`).
pub fn slack_timestamp(at: DateTime<Utc>) -> String {
    format!("{}.{:06}", at.timestamp(), at.timestamp_subsec_micros())
}

/// Parameters for one history page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRequest {
    pub channel: String,
    pub oldest: String,
    pub latest: String,
    pub limit: u32,
    pub cursor: Option<String>,
}

/// One page of history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryPage {
    pub messages: Vec<RawMessage>,
    pub has_more: bool,
    pub next_cursor: Option<String>,
}
