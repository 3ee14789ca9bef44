use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use crate::tickets::TicketRecord;

/// Records keyed by status name.
pub type GroupedReport = BTreeMap<String, Vec<TicketRecord>>;

/// Group records by status, keeping input order inside each group.
pub fn group_by_status(records: impl IntoIterator<Item = TicketRecord>) -> GroupedReport {
    let mut grouped = GroupedReport::new();
    for record in records {
        grouped
            .entry(record.status.clone())
            .or_default()
            .push(record);
    }
    grouped
}

/// Success statuses sort first, then everything by name.
pub fn compare_statuses(a: &str, b: &str, success: &BTreeSet<String>) -> Ordering {
    let rank = |s: &str| !success.contains(s);
    rank(a).cmp(&rank(b)).then_with(|| a.cmp(b))
}

/// Status names of `grouped` in report order.
pub fn ordered_statuses<'a>(grouped: &'a GroupedReport, success: &BTreeSet<String>) -> Vec<&'a str> {
    let mut statuses: Vec<&str> = grouped.keys().map(String::as_str).collect();
    statuses.sort_by(|a, b| compare_statuses(a, b, success));
    statuses
}
