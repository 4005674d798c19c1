//! Inquiry - step-by-step study abroad inquiry wizard
//!
//! The [`wizard`] module holds the step state machine; [`submission`] takes
//! over once it completes. The terminal front end lives in [`ui`] and [`app`].

pub mod app;
pub mod config;
pub mod logging;
pub mod submission;
pub mod ui;
pub mod wizard;

pub use wizard::{AdvanceOutcome, AnswerRecord, Field, StepWizard, WizardError};
