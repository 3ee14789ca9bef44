//! Decoding of the Jira issue field bag into a [`TicketRecord`].
//!
//! Custom field ids vary per site, so the document is read as untyped JSON.
//! `null` is treated the same as a missing field.

use serde_json::Value;
use tracing::debug;

use crate::config::CustomFieldIds;

use super::key::TicketKey;
use super::types::{CostEstimate, TicketRecord, NOT_SET, NO_SUMMARY, UNKNOWN_STATUS};

/// Build a record for `key` from an issue document.
pub fn decode_issue(key: &TicketKey, issue: &Value, fields: &CustomFieldIds) -> TicketRecord {
    let bag = issue.get("fields").filter(|v| v.is_object());
    let field = |id: &str| bag.and_then(|b| b.get(id)).filter(|v| !v.is_null());

    let status = field("status")
        .and_then(|s| s.get("name"))
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN_STATUS)
        .to_string();

    TicketRecord {
        key: key.clone(),
        summary: field("summary")
            .map(scalar_text)
            .unwrap_or_else(|| NO_SUMMARY.to_string()),
        cost: field(fields.cost.as_str()).map(decode_cost).unwrap_or_default(),
        status,
        cloud_regions: field(fields.cloud_regions.as_str())
            .map(join_option_values)
            .unwrap_or_default(),
        start_time: field(fields.change_start.as_str())
            .map(scalar_text)
            .unwrap_or_else(|| NOT_SET.to_string()),
        finish_time: field(fields.change_finish.as_str())
            .map(scalar_text)
            .unwrap_or_else(|| NOT_SET.to_string()),
    }
}

fn decode_cost(value: &Value) -> CostEstimate {
    match value {
        Value::Number(n) => n.as_f64().map(CostEstimate::Amount).unwrap_or_default(),
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => CostEstimate::Amount(v),
            _ => CostEstimate::Text(s.clone()),
        },
        other => {
            debug!(value = %other, "Non-numeric cost value kept as text");
            CostEstimate::Text(other.to_string())
        }
    }
}

/// Multi-select fields arrive as `[{"value": "us-east-1"}, ...]`.
fn join_option_values(value: &Value) -> String {
    match value.as_array() {
        Some(options) => options
            .iter()
            .filter_map(|o| o.get("value").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join(", "),
        None => String::new(),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
