use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub slack: SlackConfig,
    pub jira: JiraConfig,
    pub report: ReportConfig,
}

/// Slack channel history configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SlackConfig {
    /// Bot token (xoxb-...) with `channels:history` scope
    pub bot_token: String,
    /// Channel to scan for ticket mentions
    pub channel_id: String,
    /// Size of the trailing window in days (default: 7)
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,
    /// Messages requested per history page (default: 200)
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Web API base URL (default: https://slack.com/api)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

fn default_lookback_days() -> u32 {
    7
}

fn default_page_size() -> u32 {
    200
}

/// Jira issue lookup configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JiraConfig {
    /// Atlassian site domain (e.g., "your-domain.atlassian.net")
    pub domain: String,
    /// Account email used for basic auth
    pub email: String,
    /// API token paired with `email`
    pub api_token: String,
    /// Custom field identifiers
    pub fields: CustomFieldIds,
    /// Maximum concurrent issue lookups (default: 4)
    #[serde(default = "default_max_parallel_lookups")]
    pub max_parallel_lookups: usize,
    /// Timeout for a single issue lookup in seconds (default: 30)
    #[serde(default = "default_lookup_timeout_secs")]
    pub lookup_timeout_secs: u64,
}

fn default_max_parallel_lookups() -> usize {
    4
}

fn default_lookup_timeout_secs() -> u64 {
    30
}

/// Jira custom field ids carrying the change-request data.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CustomFieldIds {
    /// Cost impact estimate (numeric)
    pub cost: String,
    /// Cloud regions (multi-select)
    pub cloud_regions: String,
    /// Change start time
    pub change_start: String,
    /// Change estimated finish time
    pub change_finish: String,
}

/// Report output configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    /// Output document path (overwritten on every run)
    pub output_path: PathBuf,
    /// Statuses listed before every other status
    pub success_statuses: BTreeSet<String>,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_title() -> String {
    "Weekly Jira Cost Impact Report".to_string()
}

/// Output document format
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Docx,
    Text,
}

/// Sanitized config for logging (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub slack: SanitizedSlackConfig,
    pub jira: SanitizedJiraConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedSlackConfig {
    pub bot_token_configured: bool,
    pub channel_id: String,
    pub lookback_days: u32,
    pub page_size: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedJiraConfig {
    pub domain: String,
    pub email: String,
    pub api_token_configured: bool,
    pub fields: CustomFieldIds,
    pub max_parallel_lookups: usize,
    pub lookup_timeout_secs: u64,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            slack: SanitizedSlackConfig {
                bot_token_configured: !config.slack.bot_token.is_empty(),
                channel_id: config.slack.channel_id.clone(),
                lookback_days: config.slack.lookback_days,
                page_size: config.slack.page_size,
            },
            jira: SanitizedJiraConfig {
                domain: config.jira.domain.clone(),
                email: config.jira.email.clone(),
                api_token_configured: !config.jira.api_token.is_empty(),
                fields: config.jira.fields.clone(),
                max_parallel_lookups: config.jira.max_parallel_lookups,
                lookup_timeout_secs: config.jira.lookup_timeout_secs,
            },
            report: config.report.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
[slack]
bot_token = "xoxb-test"
channel_id = "C0123"

[jira]
domain = "acme.atlassian.net"
email = "ops@acme.io"
api_token = "secret"

[jira.fields]
cost = "customfield_10285"
cloud_regions = "customfield_10267"
change_start = "customfield_10266"
change_finish = "customfield_10272"

[report]
output_path = "Jira_Cost_Report.docx"
success_statuses = ["Deployment Success"]
"#;

    #[test]
    fn test_deserialize_with_defaults() {
        let config: Config = toml::from_str(FULL).unwrap();
        assert_eq!(config.slack.lookback_days, 7);
        assert_eq!(config.slack.page_size, 200);
        assert!(config.slack.base_url.is_none());
        assert_eq!(config.jira.max_parallel_lookups, 4);
        assert_eq!(config.jira.lookup_timeout_secs, 30);
        assert_eq!(config.jira.fields.cost, "customfield_10285");
        assert_eq!(config.report.title, "Weekly Jira Cost Impact Report");
        assert_eq!(config.report.format, OutputFormat::Docx);
        assert!(config.report.success_statuses.contains("Deployment Success"));
    }

    #[test]
    fn test_deserialize_text_format() {
        let toml = format!("{}format = \"text\"\n", FULL);
        let config: Config = toml::from_str(&toml).unwrap();
        assert_eq!(config.report.format, OutputFormat::Text);
    }

    #[test]
    fn test_deserialize_missing_field_ids_fails() {
        let toml = r#"
[slack]
bot_token = "xoxb-test"
channel_id = "C0123"

[jira]
domain = "acme.atlassian.net"
email = "ops@acme.io"
api_token = "secret"

[report]
output_path = "out.docx"
success_statuses = []
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_sanitized_config_hides_secrets() {
        let config: Config = toml::from_str(FULL).unwrap();
        let sanitized = SanitizedConfig::from(&config);
        assert!(sanitized.slack.bot_token_configured);
        assert!(sanitized.jira.api_token_configured);

        let json = serde_json::to_string(&sanitized).unwrap();
        assert!(!json.contains("xoxb-test"));
        assert!(!json.contains("secret"));
        assert!(json.contains("acme.atlassian.net"));
    }
}
