//! Local outbox: one JSON file plus a readable summary per inquiry

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use handlebars::Handlebars;
use serde::Serialize;

use super::sink::InquirySink;
use super::{Inquiry, SubmissionError};

const SUMMARY_TEMPLATE: &str = "# Study abroad inquiry {{short_id}}

Submitted: {{submitted_at}}

{{#each answers}}
- **{{label}}**: {{value}}
{{/each}}
";

#[derive(Serialize)]
struct SummaryAnswer<'a> {
    label: &'static str,
    value: &'a str,
}

#[derive(Serialize)]
struct SummaryContext<'a> {
    short_id: String,
    submitted_at: String,
    answers: Vec<SummaryAnswer<'a>>,
}

/// Writes inquiries into a directory for later pickup
pub struct OutboxSink {
    dir: PathBuf,
}

impl OutboxSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File stem shared by the JSON record and its summary
    pub fn file_stem(inquiry: &Inquiry) -> String {
        format!(
            "{}-{}-{}",
            inquiry.submitted_at.format("%Y%m%d-%H%M%S"),
            slugify(&inquiry.answers.name),
            inquiry.short_id()
        )
    }

    /// Render the markdown summary for an inquiry
    pub fn render_summary(inquiry: &Inquiry) -> Result<String, SubmissionError> {
        let mut hb = Handlebars::new();

        // Don't escape HTML entities in the output
        hb.register_escape_fn(handlebars::no_escape);

        hb.register_template_string("summary", SUMMARY_TEMPLATE)
            .map_err(|e| SubmissionError::Template(e.to_string()))?;

        let context = SummaryContext {
            short_id: inquiry.short_id(),
            submitted_at: inquiry.submitted_at.to_rfc3339(),
            answers: inquiry
                .answers
                .entries()
                .map(|(field, value)| SummaryAnswer {
                    label: field.label(),
                    value,
                })
                .collect(),
        };

        hb.render("summary", &context)
            .map_err(|e| SubmissionError::Template(e.to_string()))
    }

    /// All stored inquiries, newest first
    pub fn list(&self) -> Result<Vec<Inquiry>, SubmissionError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let entries =
            std::fs::read_dir(&self.dir).map_err(|e| SubmissionError::io(&self.dir, e))?;

        let mut inquiries = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| SubmissionError::io(&self.dir, e))?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let content =
                std::fs::read_to_string(&path).map_err(|e| SubmissionError::io(&path, e))?;
            match serde_json::from_str::<Inquiry>(&content) {
                Ok(inquiry) => inquiries.push(inquiry),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable outbox entry");
                }
            }
        }

        inquiries.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(inquiries)
    }
}

#[async_trait]
impl InquirySink for OutboxSink {
    fn name(&self) -> &str {
        "outbox"
    }

    fn is_enabled(&self) -> bool {
        true
    }

    async fn deliver(&self, inquiry: &Inquiry) -> Result<String, SubmissionError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| SubmissionError::io(&self.dir, e))?;

        let stem = Self::file_stem(inquiry);
        let json_path = self.dir.join(format!("{stem}.json"));
        let summary_path = self.dir.join(format!("{stem}.md"));

        let json = serde_json::to_string_pretty(inquiry)?;
        tokio::fs::write(&json_path, json)
            .await
            .map_err(|e| SubmissionError::io(&json_path, e))?;

        let summary = Self::render_summary(inquiry)?;
        tokio::fs::write(&summary_path, summary)
            .await
            .map_err(|e| SubmissionError::io(&summary_path, e))?;

        tracing::info!(path = %json_path.display(), "Inquiry written to outbox");
        Ok(format!("saved {}", json_path.display()))
    }
}

/// Lowercase ASCII slug, `anonymous` when nothing usable remains
fn slugify(text: &str) -> String {
    let mut slug = String::new();
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-').to_string();
    if slug.is_empty() {
        "anonymous".to_string()
    } else {
        slug
    }
}
