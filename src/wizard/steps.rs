//! Step definitions for the study-abroad inquiry

use super::answers::{AnswerRecord, Field};

/// A labelled set of mutually exclusive options bound to one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceGroup {
    /// Section caption, shown when a step has more than one group
    pub label: Option<&'static str>,
    pub field: Field,
    pub options: &'static [&'static str],
}

/// A single-line text entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEntry {
    pub field: Field,
    pub placeholder: &'static str,
}

/// How the display layer should collect a step's answers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepInput {
    /// One or more option groups
    Choice { groups: &'static [ChoiceGroup] },
    /// Free-form multi-line text
    Text {
        field: Field,
        placeholder: &'static str,
    },
    /// Several single-line text entries
    Fields { entries: &'static [TextEntry] },
}

impl StepInput {
    /// Fields this input writes to, in display order
    pub fn fields(&self) -> Vec<Field> {
        match self {
            StepInput::Choice { groups } => groups.iter().map(|g| g.field).collect(),
            StepInput::Text { field, .. } => vec![*field],
            StepInput::Fields { entries } => entries.iter().map(|e| e.field).collect(),
        }
    }
}

/// One page of the wizard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDefinition {
    pub title: &'static str,
    pub subtitle: &'static str,
    /// Larger heading above the prompt
    pub heading: &'static str,
    pub intro: &'static str,
    /// Fields that must be non-empty before the step can be left forwards
    pub required: &'static [Field],
    pub input: StepInput,
}

impl StepDefinition {
    /// The step's validator
    pub fn is_satisfied(&self, answers: &AnswerRecord) -> bool {
        self.required.iter().all(|field| answers.is_filled(*field))
    }

    pub fn missing(&self, answers: &AnswerRecord) -> Vec<Field> {
        answers.missing(self.required)
    }
}

const DEFAULT_INTRO: &str =
    "Please provide the information below to help us tailor our guidance for you.";

/// The eight steps of the inquiry, in order
pub fn study_abroad_steps() -> Vec<StepDefinition> {
    vec![
        StepDefinition {
            title: "Study Destination",
            subtitle: "Where would you like to study?",
            heading: "Your Global Journey starts here",
            intro: "But first, we’d like to get to know you a bit better. Answer the following quick questions.",
            required: &[Field::Destination],
            input: StepInput::Choice {
                groups: &[ChoiceGroup {
                    label: None,
                    field: Field::Destination,
                    options: &[
                        "United Kingdom",
                        "Canada",
                        "USA",
                        "Australia",
                        "Europe",
                        "Not sure yet (Help me choose)",
                    ],
                }],
            },
        },
        StepDefinition {
            title: "Study Level",
            subtitle: "What level do you want to study?",
            heading: "Let’s find the right academic path",
            intro: DEFAULT_INTRO,
            required: &[Field::Level],
            input: StepInput::Choice {
                groups: &[ChoiceGroup {
                    label: None,
                    field: Field::Level,
                    options: &[
                        "Diploma",
                        "Bachelor’s Degree",
                        "Master’s Degree",
                        "PhD",
                        "Short Course",
                        "I’m not sure yet",
                    ],
                }],
            },
        },
        StepDefinition {
            title: "Course Interest",
            subtitle: "What would you like to study?",
            heading: "Tell us what excites you academically",
            intro: DEFAULT_INTRO,
            required: &[Field::Interest],
            input: StepInput::Text {
                field: Field::Interest,
                placeholder: "Type your course interest here...",
            },
        },
        StepDefinition {
            title: "Education Background",
            subtitle: "What is your highest level of education?",
            heading: "Help us understand your qualifications",
            intro: DEFAULT_INTRO,
            required: &[Field::Education],
            input: StepInput::Choice {
                groups: &[ChoiceGroup {
                    label: None,
                    field: Field::Education,
                    options: &[
                        "High School",
                        "Diploma",
                        "Bachelor’s Degree",
                        "Master’s Degree",
                    ],
                }],
            },
        },
        StepDefinition {
            title: "Budget & Funding",
            subtitle: "Will you need financial support?",
            heading: "Let’s see what support you might need",
            intro: DEFAULT_INTRO,
            required: &[Field::Funding],
            input: StepInput::Choice {
                groups: &[ChoiceGroup {
                    label: None,
                    field: Field::Funding,
                    options: &["Yes", "No", "Maybe — I’d like advice"],
                }],
            },
        },
        StepDefinition {
            title: "English Proficiency",
            subtitle: "Have you taken an English test?",
            heading: "Proof of English skills",
            intro: DEFAULT_INTRO,
            required: &[Field::English],
            input: StepInput::Choice {
                groups: &[ChoiceGroup {
                    label: None,
                    field: Field::English,
                    options: &["IELTS", "TOEFL", "Duolingo", "Not yet"],
                }],
            },
        },
        StepDefinition {
            title: "Travel Readiness",
            subtitle: "When would you like to start?",
            heading: "Let’s plan your timeline",
            intro: DEFAULT_INTRO,
            required: &[Field::Timeline, Field::Passport],
            input: StepInput::Choice {
                groups: &[
                    ChoiceGroup {
                        label: Some("Start Date"),
                        field: Field::Timeline,
                        options: &["This year", "Next year", "Just exploring options"],
                    },
                    ChoiceGroup {
                        label: Some("Passport Status"),
                        field: Field::Passport,
                        options: &["Yes", "No", "Applied already"],
                    },
                ],
            },
        },
        StepDefinition {
            title: "Contact Details",
            subtitle: "Almost done!",
            heading: "Almost done! Let’s stay in touch",
            intro: DEFAULT_INTRO,
            required: &[Field::Name, Field::Email, Field::Phone],
            input: StepInput::Fields {
                entries: &[
                    TextEntry {
                        field: Field::Name,
                        placeholder: "Your Full Name",
                    },
                    TextEntry {
                        field: Field::Email,
                        placeholder: "Email Address",
                    },
                    TextEntry {
                        field: Field::Phone,
                        placeholder: "Phone / WhatsApp Number",
                    },
                ],
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eight_steps() {
        assert_eq!(study_abroad_steps().len(), 8);
    }

    #[test]
    fn test_every_field_is_required_by_exactly_one_step() {
        let steps = study_abroad_steps();
        for field in Field::all() {
            let owners = steps
                .iter()
                .filter(|step| step.required.contains(field))
                .count();
            assert_eq!(owners, 1, "field {} owned by {} steps", field, owners);
        }
    }

    #[test]
    fn test_input_fields_match_required_fields() {
        for step in study_abroad_steps() {
            assert_eq!(step.input.fields(), step.required.to_vec(), "{}", step.title);
        }
    }

    #[test]
    fn test_travel_readiness_is_conjunctive() {
        let step = &study_abroad_steps()[6];
        let mut answers = AnswerRecord::new();
        answers.set(Field::Timeline, "Next year");
        assert!(!step.is_satisfied(&answers));
        assert_eq!(step.missing(&answers), vec![Field::Passport]);

        answers.set(Field::Passport, "Yes");
        assert!(step.is_satisfied(&answers));
    }
}
