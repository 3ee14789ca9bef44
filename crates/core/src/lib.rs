pub mod config;
pub mod messaging;
pub mod pipeline;
pub mod report;
pub mod testing;
pub mod tickets;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, CustomFieldIds,
    JiraConfig, OutputFormat, ReportConfig, SanitizedConfig, SlackConfig,
};
pub use messaging::{
    Collection, HistoryPage, HistoryRequest, HistoryWindow, MessageCollector, MessagingApi,
    MessagingError, RawMessage, SlackClient, WindowOutOfRange,
};
pub use pipeline::{ChangeReport, PipelineError, ReportPipeline};
pub use report::{
    group_by_status, DocumentRenderer, DocxRenderer, GroupedReport, ReportDocument, ReportError,
    ReportWriter, TextRenderer,
};
pub use tickets::{
    decode_issue, extract_keys, CostEstimate, Enrichment, JiraClient, SkippedTicket,
    TicketEnricher, TicketKey, TicketRecord, TicketingApi, TicketingError,
};
