use super::{types::Config, ConfigError};

/// Longest accepted history window (about ten years).
pub const MAX_LOOKBACK_DAYS: u32 = 3650;

/// Validate configuration
/// Currently validates:
/// - Required sections exist (enforced by serde)
/// - Credentials, ids and custom field ids are not blank
/// - At least one deployment success status is configured
/// - Numeric knobs are not 0
/// - The lookback stays within [`MAX_LOOKBACK_DAYS`]
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let required = [
        ("slack.bot_token", &config.slack.bot_token),
        ("slack.channel_id", &config.slack.channel_id),
        ("jira.domain", &config.jira.domain),
        ("jira.email", &config.jira.email),
        ("jira.api_token", &config.jira.api_token),
        ("jira.fields.cost", &config.jira.fields.cost),
        ("jira.fields.cloud_regions", &config.jira.fields.cloud_regions),
        ("jira.fields.change_start", &config.jira.fields.change_start),
        ("jira.fields.change_finish", &config.jira.fields.change_finish),
    ];
    for (name, value) in required {
        if value.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "{} cannot be empty",
                name
            )));
        }
    }

    if config.report.output_path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "report.output_path cannot be empty".to_string(),
        ));
    }

    if config.report.success_statuses.is_empty() {
        return Err(ConfigError::ValidationError(
            "report.success_statuses must name at least one status".to_string(),
        ));
    }

    if config.slack.lookback_days == 0 {
        return Err(ConfigError::ValidationError(
            "slack.lookback_days cannot be 0".to_string(),
        ));
    }

    if config.slack.lookback_days > MAX_LOOKBACK_DAYS {
        return Err(ConfigError::ValidationError(format!(
            "slack.lookback_days cannot exceed {}",
            MAX_LOOKBACK_DAYS
        )));
    }

    if config.slack.page_size == 0 {
        return Err(ConfigError::ValidationError(
            "slack.page_size cannot be 0".to_string(),
        ));
    }

    if config.jira.max_parallel_lookups == 0 {
        return Err(ConfigError::ValidationError(
            "jira.max_parallel_lookups cannot be 0".to_string(),
        ));
    }

    if config.jira.lookup_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "jira.lookup_timeout_secs cannot be 0".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[test]
    fn test_validate_valid_config() {
        let config = fixtures::config();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_blank_token_fails() {
        let mut config = fixtures::config();
        config.jira.api_token = "   ".to_string();
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(ref msg) if msg.contains("jira.api_token")));
    }

    #[test]
    fn test_validate_blank_field_id_fails() {
        let mut config = fixtures::config();
        config.jira.fields.cloud_regions = String::new();
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(ref msg) if msg.contains("cloud_regions")));
    }

    #[test]
    fn test_validate_empty_success_set_fails() {
        let mut config = fixtures::config();
        config.report.success_statuses.clear();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_zero_parallelism_fails() {
        let mut config = fixtures::config();
        config.jira.max_parallel_lookups = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_zero_lookback_fails() {
        let mut config = fixtures::config();
        config.slack.lookback_days = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_lookback_upper_bound() {
        let mut config = fixtures::config();
        config.slack.lookback_days = MAX_LOOKBACK_DAYS;
        assert!(validate_config(&config).is_ok());

        config.slack.lookback_days = 200_000_000;
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(ref msg) if msg.contains("lookback_days")));
    }
}
