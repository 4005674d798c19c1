//! Wizard card: relays key presses into the [`StepWizard`] and keeps the
//! per-step input widgets in sync with its answers.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::ListState;
use tui_textarea::TextArea;

use crate::submission::SubmissionReport;
use crate::ui::text_input::TextInput;
use crate::wizard::{AdvanceOutcome, ChoiceGroup, Field, StepInput, StepWizard, TextEntry};

mod render;

#[cfg(test)]
mod tests;

/// What the app should do after a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenAction {
    /// Stay on the screen
    Continue,
    /// The wizard just completed; deliver the inquiry
    Submit,
    /// Leave the application
    Quit,
}

/// Delivery state shown on the completion screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionStatus {
    Pending,
    Done(SubmissionReport),
    Failed(String),
}

pub struct WizardScreen {
    wizard: StepWizard,
    /// Focused option group or text entry within the current step
    focus: usize,
    /// Highlighted option, one list state per option group
    choice_states: Vec<ListState>,
    textarea: TextArea<'static>,
    entries: Vec<TextInput>,
    /// Shown after a blocked advance until the next edit
    blocked_hint: Option<String>,
    submission: Option<SubmissionStatus>,
}

impl Default for WizardScreen {
    fn default() -> Self {
        Self::new(StepWizard::new())
    }
}

impl WizardScreen {
    pub fn new(wizard: StepWizard) -> Self {
        let mut screen = Self {
            wizard,
            focus: 0,
            choice_states: Vec::new(),
            textarea: TextArea::default(),
            entries: Vec::new(),
            blocked_hint: None,
            submission: None,
        };
        screen.load_step();
        screen
    }

    pub fn wizard(&self) -> &StepWizard {
        &self.wizard
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn blocked_hint(&self) -> Option<&str> {
        self.blocked_hint.as_deref()
    }

    pub fn submission(&self) -> Option<&SubmissionStatus> {
        self.submission.as_ref()
    }

    /// Highlighted option index for a group of the current step
    pub fn highlighted(&self, group: usize) -> Option<usize> {
        self.choice_states.get(group).and_then(ListState::selected)
    }

    pub fn set_submission(&mut self, status: SubmissionStatus) {
        self.submission = Some(status);
    }

    /// Rebuild the input widgets for the current step from the answers
    fn load_step(&mut self) {
        self.focus = 0;
        self.blocked_hint = None;
        self.choice_states.clear();
        self.entries.clear();

        let answers = self.wizard.answers();
        match self.wizard.current().input.clone() {
            StepInput::Choice { groups } => {
                for group in groups {
                    let current = answers.get(group.field);
                    let index = group
                        .options
                        .iter()
                        .position(|option| *option == current)
                        .unwrap_or(0);
                    let mut state = ListState::default();
                    state.select(Some(index));
                    self.choice_states.push(state);
                }
            }
            StepInput::Text { field, placeholder } => {
                let value = answers.get(field);
                let mut textarea = if value.is_empty() {
                    TextArea::default()
                } else {
                    TextArea::new(value.split('\n').map(String::from).collect())
                };
                textarea.set_placeholder_text(placeholder);
                textarea.move_cursor(tui_textarea::CursorMove::Bottom);
                textarea.move_cursor(tui_textarea::CursorMove::End);
                self.textarea = textarea;
            }
            StepInput::Fields { entries } => {
                for entry in entries {
                    self.entries
                        .push(TextInput::new(entry.placeholder, answers.get(entry.field)));
                }
            }
        }
    }

    fn set_field(&mut self, field: Field, value: String) {
        self.wizard.update_field(field, value);
        self.blocked_hint = None;
    }

    fn try_advance(&mut self) -> ScreenAction {
        match self.wizard.advance() {
            AdvanceOutcome::Moved(_) => {
                self.load_step();
                ScreenAction::Continue
            }
            AdvanceOutcome::Completed => {
                self.submission = Some(SubmissionStatus::Pending);
                ScreenAction::Submit
            }
            AdvanceOutcome::Blocked => {
                let missing = self.wizard.current().missing(self.wizard.answers());
                let labels: Vec<&str> = missing.iter().map(Field::label).collect();
                self.blocked_hint = Some(format!("Still needed: {}", labels.join(", ")));
                ScreenAction::Continue
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ScreenAction {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
        {
            return ScreenAction::Quit;
        }

        if self.wizard.is_completed() {
            return self.handle_completed_key(key.code);
        }

        if key.code == KeyCode::Esc {
            if self.wizard.retreat() {
                self.load_step();
            }
            return ScreenAction::Continue;
        }

        let input = self.wizard.current().input.clone();
        if input.fields().is_empty() {
            // Nothing to collect on this step
            return if key.code == KeyCode::Enter {
                self.try_advance()
            } else {
                ScreenAction::Continue
            };
        }

        match input {
            StepInput::Choice { groups } => self.handle_choice_key(key.code, groups),
            StepInput::Text { field, .. } => self.handle_text_key(key, field),
            StepInput::Fields { entries } => self.handle_fields_key(key.code, entries),
        }
    }

    fn handle_completed_key(&mut self, key: KeyCode) -> ScreenAction {
        match key {
            KeyCode::Enter | KeyCode::Char('n') | KeyCode::Char('N') => {
                if matches!(self.submission, Some(SubmissionStatus::Pending)) {
                    return ScreenAction::Continue;
                }
                self.wizard.reset();
                self.submission = None;
                self.load_step();
                ScreenAction::Continue
            }
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => ScreenAction::Quit,
            _ => ScreenAction::Continue,
        }
    }

    fn handle_choice_key(&mut self, key: KeyCode, groups: &[ChoiceGroup]) -> ScreenAction {
        let group = &groups[self.focus];
        let len = group.options.len();
        if len == 0 {
            return ScreenAction::Continue;
        }
        let highlighted = self.choice_states[self.focus].selected().unwrap_or(0);

        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                let i = if highlighted == 0 { len - 1 } else { highlighted - 1 };
                self.choice_states[self.focus].select(Some(i));
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.choice_states[self.focus].select(Some((highlighted + 1) % len));
            }
            KeyCode::Tab => {
                self.focus = (self.focus + 1) % groups.len();
            }
            KeyCode::BackTab => {
                self.focus = if self.focus == 0 {
                    groups.len() - 1
                } else {
                    self.focus - 1
                };
            }
            KeyCode::Char(' ') => {
                self.set_field(group.field, group.options[highlighted].to_string());
            }
            KeyCode::Enter => {
                self.set_field(group.field, group.options[highlighted].to_string());
                if self.focus + 1 < groups.len() {
                    self.focus += 1;
                } else {
                    return self.try_advance();
                }
            }
            _ => {}
        }
        ScreenAction::Continue
    }

    fn handle_text_key(&mut self, key: KeyEvent, field: Field) -> ScreenAction {
        if key.code == KeyCode::Enter {
            if key.modifiers.contains(KeyModifiers::ALT) {
                self.textarea.insert_newline();
            } else {
                return self.try_advance();
            }
        } else if !self.textarea.input(key) {
            return ScreenAction::Continue;
        }
        let value = self.textarea.lines().join("\n");
        self.set_field(field, value);
        ScreenAction::Continue
    }

    fn handle_fields_key(&mut self, key: KeyCode, entries: &[TextEntry]) -> ScreenAction {
        let count = entries.len();
        match key {
            KeyCode::Tab | KeyCode::Down => {
                self.focus = (self.focus + 1) % count;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = if self.focus == 0 {
                    count - 1
                } else {
                    self.focus - 1
                };
            }
            KeyCode::Enter => {
                if self.focus + 1 < count {
                    self.focus += 1;
                } else {
                    return self.try_advance();
                }
            }
            other => {
                if self.entries[self.focus].handle_key(other) {
                    let value = self.entries[self.focus].value().to_string();
                    self.set_field(entries[self.focus].field, value);
                }
            }
        }
        ScreenAction::Continue
    }
}
