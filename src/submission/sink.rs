//! Inquiry sink trait definition.

use async_trait::async_trait;

use super::{Inquiry, SubmissionError};

/// A destination for completed inquiries (local outbox, CRM webhook, ...)
#[async_trait]
pub trait InquirySink: Send + Sync {
    /// Sink name (for logging and the submission report)
    fn name(&self) -> &str;

    fn is_enabled(&self) -> bool;

    /// Deliver one inquiry, returning a short human-readable receipt
    async fn deliver(&self, inquiry: &Inquiry) -> Result<String, SubmissionError>;
}
