//! Jira Cloud REST v3 issue client.
//!
//! Authenticates with HTTP basic auth (account email + API token).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::config::JiraConfig;

use super::key::TicketKey;
use super::{TicketingApi, TicketingError};

/// Jira issue API client.
pub struct JiraClient {
    client: Client,
    base_url: String,
    email: String,
    api_token: String,
}

impl JiraClient {
    /// Create a new Jira client.
    pub fn new(config: &JiraConfig) -> Result<Self, TicketingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.lookup_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url_for(&config.domain),
            email: config.email.clone(),
            api_token: config.api_token.clone(),
        })
    }

    fn issue_url(&self, key: &TicketKey) -> String {
        format!(
            "{}/rest/api/3/issue/{}",
            self.base_url,
            urlencoding::encode(key.as_str())
        )
    }
}

/// `acme.atlassian.net` becomes `https://acme.atlassian.net`; explicit
/// schemes are kept so a local stub can be targeted.
fn base_url_for(domain: &str) -> String {
    let domain = domain.trim().trim_end_matches('/');
    if domain.starts_with("http://") || domain.starts_with("https://") {
        domain.to_string()
    } else {
        format!("https://{}", domain)
    }
}

/// Error for a non-success response to an issue lookup.
fn map_status(status: StatusCode, key: &TicketKey, body: &str) -> TicketingError {
    match status {
        StatusCode::NOT_FOUND => TicketingError::NotFound(key.to_string()),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => TicketingError::Unauthorized(
            format!("HTTP {} reading {}", status.as_u16(), key),
        ),
        StatusCode::TOO_MANY_REQUESTS => TicketingError::RateLimited,
        _ => TicketingError::ApiError {
            status: status.as_u16(),
            message: body.chars().take(200).collect(),
        },
    }
}

#[async_trait]
impl TicketingApi for JiraClient {
    async fn get_issue(&self, key: &TicketKey) -> Result<Value, TicketingError> {
        let url = self.issue_url(key);

        debug!(key = %key, "Jira get issue");

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.email, Some(&self.api_token))
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status(status, key, &body));
        }

        response.json().await.map_err(|e| {
            TicketingError::ParseError(format!("Failed to parse issue {}: {}", key, e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[test]
    fn test_base_url_from_domain() {
        assert_eq!(
            base_url_for("acme.atlassian.net"),
            "https://acme.atlassian.net"
        );
        assert_eq!(
            base_url_for("acme.atlassian.net/"),
            "https://acme.atlassian.net"
        );
        assert_eq!(
            base_url_for("http://127.0.0.1:8080"),
            "http://127.0.0.1:8080"
        );
    }

    #[test]
    fn test_issue_url() {
        let client = JiraClient::new(&fixtures::config().jira).unwrap();
        let key = TicketKey::parse("CHG-7").unwrap();
        assert_eq!(
            client.issue_url(&key),
            "https://acme.atlassian.net/rest/api/3/issue/CHG-7"
        );
    }

    #[test]
    fn test_map_status() {
        let key = TicketKey::parse("CHG-7").unwrap();

        assert!(matches!(
            map_status(StatusCode::NOT_FOUND, &key, ""),
            TicketingError::NotFound(ref k) if k == "CHG-7"
        ));
        for status in [StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN] {
            assert!(matches!(
                map_status(status, &key, ""),
                TicketingError::Unauthorized(ref msg) if msg.contains("CHG-7")
            ));
        }
        assert!(matches!(
            map_status(StatusCode::TOO_MANY_REQUESTS, &key, ""),
            TicketingError::RateLimited
        ));
    }

    #[test]
    fn test_map_status_other_errors_keep_truncated_body() {
        let key = TicketKey::parse("CHG-7").unwrap();
        let body = "x".repeat(500);

        match map_status(StatusCode::SERVICE_UNAVAILABLE, &key, &body) {
            TicketingError::ApiError { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message.len(), 200);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
