//! Answer record collected by the inquiry wizard

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Every field the wizard can collect. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Destination,
    Level,
    Interest,
    Education,
    Funding,
    English,
    Timeline,
    Passport,
    Name,
    Email,
    Phone,
}

impl Field {
    pub fn all() -> &'static [Field] {
        &[
            Field::Destination,
            Field::Level,
            Field::Interest,
            Field::Education,
            Field::Funding,
            Field::English,
            Field::Timeline,
            Field::Passport,
            Field::Name,
            Field::Email,
            Field::Phone,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Destination => "destination",
            Field::Level => "level",
            Field::Interest => "interest",
            Field::Education => "education",
            Field::Funding => "funding",
            Field::English => "english",
            Field::Timeline => "timeline",
            Field::Passport => "passport",
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
        }
    }

    /// Human label used in summaries and error messages
    pub fn label(&self) -> &'static str {
        match self {
            Field::Destination => "Study destination",
            Field::Level => "Study level",
            Field::Interest => "Course interest",
            Field::Education => "Highest education",
            Field::Funding => "Financial support",
            Field::English => "English test",
            Field::Timeline => "Start date",
            Field::Passport => "Passport status",
            Field::Name => "Full name",
            Field::Email => "Email address",
            Field::Phone => "Phone / WhatsApp",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a field name outside the fixed key set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown answer field '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::all()
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// The accumulated answers. One slot per [`Field`], all empty at start.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnswerRecord {
    pub destination: String,
    pub level: String,
    pub interest: String,
    pub education: String,
    pub funding: String,
    pub english: String,
    pub timeline: String,
    pub passport: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl AnswerRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Destination => &self.destination,
            Field::Level => &self.level,
            Field::Interest => &self.interest,
            Field::Education => &self.education,
            Field::Funding => &self.funding,
            Field::English => &self.english,
            Field::Timeline => &self.timeline,
            Field::Passport => &self.passport,
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Destination => &mut self.destination,
            Field::Level => &mut self.level,
            Field::Interest => &mut self.interest,
            Field::Education => &mut self.education,
            Field::Funding => &mut self.funding,
            Field::English => &mut self.english,
            Field::Timeline => &mut self.timeline,
            Field::Passport => &mut self.passport,
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.slot_mut(field) = value.into();
    }

    /// A field counts as answered as soon as it holds any text at all
    pub fn is_filled(&self, field: Field) -> bool {
        !self.get(field).is_empty()
    }

    /// The subset of `fields` that are still empty, in the given order
    pub fn missing(&self, fields: &[Field]) -> Vec<Field> {
        fields
            .iter()
            .copied()
            .filter(|field| !self.is_filled(*field))
            .collect()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Read a record from a `.toml` file, or JSON for any other extension
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read answers from {}", path.display()))?;

        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        let record = if is_toml {
            toml::from_str(&content)
                .with_context(|| format!("Invalid TOML answers in {}", path.display()))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("Invalid JSON answers in {}", path.display()))?
        };
        Ok(record)
    }

    /// Field/value pairs in wizard order
    pub fn entries(&self) -> impl Iterator<Item = (Field, &str)> {
        Field::all().iter().map(move |field| (*field, self.get(*field)))
    }
}
