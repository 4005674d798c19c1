//! Delivery of completed inquiries.
//!
//! The wizard stops at `Completed`; everything after that lives here. An
//! [`Inquiry`] is stamped from a completed wizard and handed to every enabled
//! [`InquirySink`] by the [`SubmissionService`].

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::wizard::{AnswerRecord, StepWizard};

mod outbox;
mod service;
mod sink;
mod webhook;

pub use outbox::OutboxSink;
pub use service::{Delivery, SubmissionReport, SubmissionService};
pub use sink::InquirySink;
pub use webhook::WebhookSink;

/// Errors raised while delivering an inquiry
#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error("the inquiry has not been completed yet")]
    NotCompleted,

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode inquiry: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to render inquiry summary: {0}")]
    Template(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("endpoint rejected the inquiry with status {status}")]
    Rejected { status: u16 },
}

impl SubmissionError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SubmissionError::Io {
            path: path.into(),
            source,
        }
    }
}

/// A completed set of answers ready for delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inquiry {
    pub id: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub answers: AnswerRecord,
}

impl Inquiry {
    /// Stamp an inquiry from a wizard that has reached `Completed`
    pub fn from_wizard(wizard: &StepWizard) -> Result<Self, SubmissionError> {
        if !wizard.is_completed() {
            return Err(SubmissionError::NotCompleted);
        }
        Ok(Self {
            id: Uuid::new_v4(),
            submitted_at: Utc::now(),
            answers: wizard.answers().clone(),
        })
    }

    /// First eight hex digits of the id
    pub fn short_id(&self) -> String {
        self.id.simple().to_string()[..8].to_string()
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_from_wizard_requires_completion() {
        let wizard = StepWizard::new();
        assert!(matches!(
            Inquiry::from_wizard(&wizard),
            Err(SubmissionError::NotCompleted)
        ));
    }

    #[test]
    fn test_from_wizard_copies_answers() {
        let inquiry = sample_inquiry();
        assert_eq!(inquiry.answers, sample_answers());
        assert_eq!(inquiry.short_id().len(), 8);
    }

    #[test]
    fn test_inquiry_json_uses_field_names() {
        let json = serde_json::to_value(sample_inquiry()).unwrap();
        assert_eq!(json["answers"]["destination"], "Canada");
        assert_eq!(json["answers"]["phone"], "+256 700 000 000");
    }
}
