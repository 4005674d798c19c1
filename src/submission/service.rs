//! Dispatches a completed inquiry to every configured sink.

use std::sync::Arc;

use super::outbox::OutboxSink;
use super::sink::InquirySink;
use super::webhook::WebhookSink;
use super::Inquiry;
use crate::config::Config;

/// Outcome of one sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub sink: String,
    pub detail: String,
}

/// What happened to an inquiry across all sinks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionReport {
    pub delivered: Vec<Delivery>,
    pub failed: Vec<Delivery>,
}

impl SubmissionReport {
    /// At least one sink took the inquiry and none failed
    pub fn is_success(&self) -> bool {
        !self.delivered.is_empty() && self.failed.is_empty()
    }
}

/// Central submission dispatcher.
pub struct SubmissionService {
    sinks: Vec<Arc<dyn InquirySink>>,
}

impl SubmissionService {
    pub fn from_config(config: &Config) -> Self {
        let mut sinks: Vec<Arc<dyn InquirySink>> = Vec::new();

        if config.submission.outbox_enabled {
            sinks.push(Arc::new(OutboxSink::new(config.outbox_path())));
        }

        if let Some(ref webhook_config) = config.submission.webhook {
            if webhook_config.enabled && !webhook_config.url.is_empty() {
                match WebhookSink::new(webhook_config) {
                    Ok(webhook) => sinks.push(Arc::new(webhook)),
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to create webhook sink");
                    }
                }
            }
        }

        if sinks.is_empty() {
            tracing::warn!("No inquiry sinks configured; completed inquiries will be dropped");
        }

        Self { sinks }
    }

    pub fn with_sinks(sinks: Vec<Arc<dyn InquirySink>>) -> Self {
        Self { sinks }
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    pub fn sink_names(&self) -> Vec<&str> {
        self.sinks.iter().map(|sink| sink.name()).collect()
    }

    /// Deliver to every enabled sink. A failing sink never stops the others.
    pub async fn submit(&self, inquiry: &Inquiry) -> SubmissionReport {
        let mut report = SubmissionReport::default();

        for sink in self.sinks.iter().filter(|sink| sink.is_enabled()) {
            match sink.deliver(inquiry).await {
                Ok(detail) => report.delivered.push(Delivery {
                    sink: sink.name().to_string(),
                    detail,
                }),
                Err(e) => {
                    tracing::warn!(
                        sink = %sink.name(),
                        inquiry = %inquiry.id,
                        error = %e,
                        "Inquiry delivery failed"
                    );
                    report.failed.push(Delivery {
                        sink: sink.name().to_string(),
                        detail: e.to_string(),
                    });
                }
            }
        }

        report
    }
}
