use std::fmt;

use serde::{Deserialize, Serialize};

use super::key::TicketKey;

/// Placeholder for unset optional fields.
pub const NOT_SET: &str = "Not Set";
/// Summary used when the issue has none.
pub const NO_SUMMARY: &str = "No summary";
/// Status used when the issue has none.
pub const UNKNOWN_STATUS: &str = "Unknown";

/// Cost impact estimate carried by the cost custom field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CostEstimate {
    /// Numeric estimate in dollars.
    Amount(f64),
    /// Non-numeric value, kept verbatim.
    Text(String),
    #[default]
    NotSet,
}

impl fmt::Display for CostEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CostEstimate::Amount(v) => write!(f, "{}", v),
            CostEstimate::Text(s) => f.write_str(s),
            CostEstimate::NotSet => f.write_str(NOT_SET),
        }
    }
}

/// A change request resolved from Jira, with every optional field defaulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketRecord {
    pub key: TicketKey,
    pub summary: String,
    pub cost: CostEstimate,
    pub status: String,
    /// Region names joined with `", "`; empty when none.
    pub cloud_regions: String,
    pub start_time: String,
    pub finish_time: String,
}
