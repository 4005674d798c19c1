pub mod contact_panel;
pub mod terminal_guard;
pub mod text_input;
pub mod wizard_screen;

pub use contact_panel::render_contact_panel;
pub use terminal_guard::{install_panic_hook, TerminalGuard};
pub use wizard_screen::{ScreenAction, SubmissionStatus, WizardScreen};
