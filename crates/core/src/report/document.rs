//! Renderer-independent report layout.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::tickets::TicketRecord;

use super::grouping::{ordered_statuses, GroupedReport};

/// Line closing every record block.
pub const SEPARATOR: &str = "----------------------------------------";

/// The whole report: a title and one section per status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportDocument {
    pub title: String,
    pub sections: Vec<ReportSection>,
}

/// All records sharing one status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSection {
    pub status: String,
    pub blocks: Vec<RecordBlock>,
}

/// Paragraph lines describing one record, separator included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordBlock {
    pub lines: Vec<String>,
}

impl ReportSection {
    pub fn heading(&self) -> String {
        format!("Status: {}", self.status)
    }
}

impl RecordBlock {
    pub fn for_record(record: &TicketRecord) -> Self {
        Self {
            lines: vec![
                format!("Issue: {}", record.key),
                format!("Summary: {}", record.summary),
                format!("Cost Impact Estimation ($): {}", record.cost),
                format!("Cloud Regions: {}", record.cloud_regions),
                format!("Change Start Time: {}", record.start_time),
                format!("Change Estimated Finish Time: {}", record.finish_time),
                SEPARATOR.to_string(),
            ],
        }
    }
}

impl ReportDocument {
    /// Lay out `grouped` with success statuses first.
    pub fn build(title: &str, grouped: &GroupedReport, success: &BTreeSet<String>) -> Self {
        let sections = ordered_statuses(grouped, success)
            .into_iter()
            .map(|status| ReportSection {
                status: status.to_string(),
                blocks: grouped[status].iter().map(RecordBlock::for_record).collect(),
            })
            .collect();

        Self {
            title: title.to_string(),
            sections,
        }
    }

    pub fn record_count(&self) -> usize {
        self.sections.iter().map(|s| s.blocks.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::group_by_status;
    use crate::testing::fixtures;
    use crate::tickets::CostEstimate;

    #[test]
    fn test_block_lines() {
        let mut record = fixtures::record("CHG-5", "Done");
        record.summary = "Patch kernel".to_string();
        record.cost = CostEstimate::Amount(99.0);
        record.cloud_regions = "us-east-1, eu-west-1".to_string();

        let block = RecordBlock::for_record(&record);
        assert_eq!(
            block.lines,
            vec![
                "Issue: CHG-5",
                "Summary: Patch kernel",
                "Cost Impact Estimation ($): 99",
                "Cloud Regions: us-east-1, eu-west-1",
                "Change Start Time: Not Set",
                "Change Estimated Finish Time: Not Set",
                "----------------------------------------",
            ]
        );
        assert_eq!(SEPARATOR.len(), 40);
    }

    #[test]
    fn test_build_orders_sections() {
        let grouped = group_by_status(vec![
            fixtures::record("CHG-1", "Failed"),
            fixtures::record("CHG-2", "Deployment Success"),
            fixtures::record("CHG-3", "Blocked"),
        ]);
        let success = ["Deployment Success".to_string()].into_iter().collect();

        let doc = ReportDocument::build("Weekly", &grouped, &success);
        let headings: Vec<_> = doc.sections.iter().map(|s| s.heading()).collect();
        assert_eq!(
            headings,
            vec![
                "Status: Deployment Success",
                "Status: Blocked",
                "Status: Failed"
            ]
        );
        assert_eq!(doc.title, "Weekly");
        assert_eq!(doc.record_count(), 3);
    }

    #[test]
    fn test_build_empty() {
        let doc = ReportDocument::build("Weekly", &GroupedReport::new(), &BTreeSet::new());
        assert!(doc.sections.is_empty());
        assert_eq!(doc.record_count(), 0);
    }
}
