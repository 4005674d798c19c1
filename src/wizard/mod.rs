//! Linear step wizard driving the inquiry form.
//!
//! The wizard owns the step sequence, a 1-based step pointer, the completion
//! flag and the [`AnswerRecord`]. It renders nothing; the display layer reads
//! its accessors and relays edits and transition requests back in.

use thiserror::Error;

pub mod answers;
pub mod steps;

pub use answers::{AnswerRecord, Field, UnknownField};
pub use steps::{study_abroad_steps, ChoiceGroup, StepDefinition, StepInput, TextEntry};


/// Errors raised while building or replaying a wizard
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error("a wizard needs at least one step")]
    NoSteps,

    #[error("step {step} ({title}) is missing: {}", format_fields(.missing))]
    Incomplete {
        step: usize,
        title: &'static str,
        missing: Vec<Field>,
    },
}

fn format_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(Field::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Where the wizard currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    InProgress(usize),
    Completed,
}

/// Result of an `advance()` request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// The current step's validator failed; nothing changed
    Blocked,
    /// Moved forward to the given step
    Moved(usize),
    /// The last step was accepted and the wizard is now complete
    Completed,
}

/// The inquiry state machine
#[derive(Debug, Clone)]
pub struct StepWizard {
    steps: Vec<StepDefinition>,
    step: usize,
    completed: bool,
    answers: AnswerRecord,
}

impl Default for StepWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl StepWizard {
    /// Create a wizard over the built-in study-abroad steps
    pub fn new() -> Self {
        Self {
            steps: study_abroad_steps(),
            step: 1,
            completed: false,
            answers: AnswerRecord::new(),
        }
    }

    /// Create a wizard over a custom step sequence
    pub fn with_steps(steps: Vec<StepDefinition>) -> Result<Self, WizardError> {
        if steps.is_empty() {
            return Err(WizardError::NoSteps);
        }
        Ok(Self {
            steps,
            step: 1,
            completed: false,
            answers: AnswerRecord::new(),
        })
    }

    /// Drive a fresh wizard through every step with the given answers.
    ///
    /// Stops at the first step whose validator fails.
    pub fn replay(answers: &AnswerRecord) -> Result<Self, WizardError> {
        let mut wizard = Self::new();
        while !wizard.completed {
            let definition = wizard.current().clone();
            for field in definition.input.fields() {
                wizard.update_field(field, answers.get(field));
            }
            if wizard.advance() == AdvanceOutcome::Blocked {
                return Err(WizardError::Incomplete {
                    step: wizard.step,
                    title: definition.title,
                    missing: definition.missing(&wizard.answers),
                });
            }
        }
        Ok(wizard)
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }

    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }

    /// Definition of the step the pointer is on
    pub fn current(&self) -> &StepDefinition {
        &self.steps[self.step - 1]
    }

    pub fn answers(&self) -> &AnswerRecord {
        &self.answers
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn phase(&self) -> Phase {
        if self.completed {
            Phase::Completed
        } else {
            Phase::InProgress(self.step)
        }
    }

    /// Fraction of the way through, `step / total_steps`
    pub fn progress(&self) -> f64 {
        self.step as f64 / self.total_steps() as f64
    }

    pub fn is_last_step(&self) -> bool {
        self.step == self.total_steps()
    }

    /// Record a value for `field`.
    ///
    /// Any value is accepted while the wizard is in progress. Once completed,
    /// edits are ignored and `false` is returned so the record keeps
    /// satisfying every step; `reset()` is the only way back to an editable
    /// wizard.
    pub fn update_field(&mut self, field: Field, value: impl Into<String>) -> bool {
        if self.completed {
            tracing::debug!(field = %field, "Ignoring edit on completed inquiry");
            return false;
        }
        self.answers.set(field, value);
        true
    }

    /// Whether the current step's required fields are all filled
    pub fn is_step_valid(&self) -> bool {
        self.steps
            .get(self.step.wrapping_sub(1))
            .map_or(true, |definition| definition.is_satisfied(&self.answers))
    }

    /// Move forward one step, or complete the wizard on the last step
    pub fn advance(&mut self) -> AdvanceOutcome {
        if self.completed || !self.is_step_valid() {
            return AdvanceOutcome::Blocked;
        }
        if self.step < self.total_steps() {
            self.step += 1;
            tracing::debug!(step = self.step, "Advanced");
            AdvanceOutcome::Moved(self.step)
        } else {
            self.completed = true;
            tracing::info!(steps = self.total_steps(), "Inquiry completed");
            AdvanceOutcome::Completed
        }
    }

    /// Move back one step. Returns false when already on the first step.
    pub fn retreat(&mut self) -> bool {
        if self.completed || self.step <= 1 {
            return false;
        }
        self.step -= 1;
        tracing::debug!(step = self.step, "Retreated");
        true
    }

    /// Start a new inquiry from a blank record
    pub fn reset(&mut self) {
        self.step = 1;
        self.completed = false;
        self.answers.clear();
    }
}
