//! Webhook delivery of completed inquiries.

use std::time::Duration;

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use chrono::Utc;
use reqwest::Client;
use serde::Serialize;
use tracing::warn;

use super::sink::InquirySink;
use super::{Inquiry, SubmissionError};
use crate::config::WebhookConfig;

/// Event name carried in every payload
const EVENT_NAME: &str = "inquiry.submitted";

/// Webhook payload format.
#[derive(Debug, Serialize)]
struct WebhookPayload {
    event: &'static str,
    /// ISO 8601 timestamp
    timestamp: String,
    data: serde_json::Value,
}

/// POSTs each inquiry as JSON to a configured endpoint.
///
/// Transient failures are retried with exponential backoff.
pub struct WebhookSink {
    name: String,
    url: String,
    token: Option<String>,
    enabled: bool,
    max_retries: usize,
    base_delay: Duration,
    client: Client,
}

impl WebhookSink {
    pub fn new(config: &WebhookConfig) -> Result<Self, SubmissionError> {
        let token = match config.token_env.as_deref() {
            Some(env_var) => {
                let token = std::env::var(env_var).unwrap_or_default();
                if token.is_empty() {
                    warn!(
                        webhook = config.name.as_deref().unwrap_or("webhook"),
                        env_var, "Bearer token environment variable is not set or empty"
                    );
                    None
                } else {
                    Some(token)
                }
            }
            None => None,
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            name: config.name.clone().unwrap_or_else(|| "webhook".to_string()),
            url: config.url.clone(),
            token,
            enabled: config.enabled,
            max_retries: config.max_retries,
            base_delay: Duration::from_millis(500),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn retry_strategy(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(self.base_delay)
            .with_max_delay(Duration::from_secs(10))
            .with_max_times(self.max_retries)
    }

    /// Timeouts, connection failures, 429 and 5xx are worth another attempt
    fn should_retry(err: &SubmissionError) -> bool {
        match err {
            SubmissionError::Http(e) => e.is_timeout() || e.is_connect(),
            SubmissionError::Rejected { status } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    async fn post_once(&self, payload: &WebhookPayload) -> Result<u16, SubmissionError> {
        let mut request = self.client.post(&self.url).json(payload);
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(status.as_u16())
        } else {
            Err(SubmissionError::Rejected {
                status: status.as_u16(),
            })
        }
    }
}

#[async_trait]
impl InquirySink for WebhookSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    async fn deliver(&self, inquiry: &Inquiry) -> Result<String, SubmissionError> {
        let payload = WebhookPayload {
            event: EVENT_NAME,
            timestamp: Utc::now().to_rfc3339(),
            data: serde_json::to_value(inquiry)?,
        };

        let op = || self.post_once(&payload);
        let status = op
            .retry(self.retry_strategy())
            .when(Self::should_retry)
            .notify(|err, dur| {
                warn!(webhook = %self.name, "Retrying inquiry delivery after {:?}: {}", dur, err);
            })
            .await?;

        tracing::info!(webhook = %self.name, status, "Inquiry delivered");
        Ok(format!("POST {} -> {}", self.url, status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submission::test_support::sample_inquiry;

    fn make_config(url: &str, token_env: Option<&str>) -> WebhookConfig {
        WebhookConfig {
            name: Some("crm".to_string()),
            enabled: true,
            url: url.to_string(),
            token_env: token_env.map(String::from),
            max_retries: 0,
            timeout_secs: 1,
        }
    }

    #[test]
    fn test_webhook_from_config() {
        let sink = WebhookSink::new(&make_config("https://crm.example.com/hook", None)).unwrap();
        assert_eq!(sink.name(), "crm");
        assert_eq!(sink.url(), "https://crm.example.com/hook");
        assert!(sink.is_enabled());
        assert!(!sink.has_token());
    }

    #[test]
    fn test_missing_token_env_means_no_auth() {
        let sink = WebhookSink::new(&make_config(
            "https://crm.example.com/hook",
            Some("INQUIRY_TEST_TOKEN_THAT_IS_NEVER_SET"),
        ))
        .unwrap();
        assert!(!sink.has_token());
    }

    #[test]
    fn test_should_retry_on_server_errors_only() {
        assert!(WebhookSink::should_retry(&SubmissionError::Rejected {
            status: 503
        }));
        assert!(WebhookSink::should_retry(&SubmissionError::Rejected {
            status: 429
        }));
        assert!(!WebhookSink::should_retry(&SubmissionError::Rejected {
            status: 400
        }));
        assert!(!WebhookSink::should_retry(&SubmissionError::NotCompleted));
    }

    #[test]
    fn test_payload_format() {
        let inquiry = sample_inquiry();
        let payload = WebhookPayload {
            event: EVENT_NAME,
            timestamp: Utc::now().to_rfc3339(),
            data: serde_json::to_value(&inquiry).unwrap(),
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["event"], "inquiry.submitted");
        assert_eq!(json["data"]["answers"]["email"], "amina@example.com");
        assert!(json["timestamp"].as_str().unwrap().contains('T'));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_fails() {
        // Port 9 (discard) on localhost is closed in test environments
        let sink = WebhookSink::new(&make_config("http://127.0.0.1:9/hook", None)).unwrap();
        let result = sink.deliver(&sample_inquiry()).await;
        assert!(matches!(result, Err(SubmissionError::Http(_))));
    }
}
