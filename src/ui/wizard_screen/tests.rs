//! Tests for the wizard screen

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, Terminal};

use super::{ScreenAction, SubmissionStatus, WizardScreen};
use crate::submission::{Delivery, SubmissionReport};
use crate::wizard::Field;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn press(screen: &mut WizardScreen, code: KeyCode) -> ScreenAction {
    screen.handle_key(key(code))
}

fn type_str(screen: &mut WizardScreen, text: &str) {
    for c in text.chars() {
        press(screen, KeyCode::Char(c));
    }
}

/// Accept the highlighted defaults up to the contact step
fn drive_to_contact_step(screen: &mut WizardScreen) {
    press(screen, KeyCode::Enter); // destination
    press(screen, KeyCode::Enter); // level
    type_str(screen, "Nursing");
    press(screen, KeyCode::Enter); // interest
    press(screen, KeyCode::Enter); // education
    press(screen, KeyCode::Enter); // funding
    press(screen, KeyCode::Enter); // english
    press(screen, KeyCode::Enter); // timeline
    press(screen, KeyCode::Enter); // passport
    assert_eq!(screen.wizard().step(), 8);
}

fn render_to_string(screen: &mut WizardScreen) -> String {
    let backend = TestBackend::new(100, 30);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| screen.render(frame, frame.area()))
        .unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

#[test]
fn test_enter_picks_highlighted_option_and_advances() {
    let mut screen = WizardScreen::default();
    assert_eq!(press(&mut screen, KeyCode::Enter), ScreenAction::Continue);

    assert_eq!(screen.wizard().step(), 2);
    assert_eq!(screen.wizard().answers().get(Field::Destination), "United Kingdom");
}

#[test]
fn test_space_selects_without_advancing() {
    let mut screen = WizardScreen::default();
    press(&mut screen, KeyCode::Down);
    press(&mut screen, KeyCode::Char(' '));

    assert_eq!(screen.wizard().step(), 1);
    assert_eq!(screen.wizard().answers().get(Field::Destination), "Canada");
}

#[test]
fn test_highlight_wraps_around() {
    let mut screen = WizardScreen::default();
    press(&mut screen, KeyCode::Up);
    assert_eq!(screen.highlighted(0), Some(5));
    press(&mut screen, KeyCode::Down);
    assert_eq!(screen.highlighted(0), Some(0));
}

#[test]
fn test_empty_text_step_is_blocked_with_hint() {
    let mut screen = WizardScreen::default();
    press(&mut screen, KeyCode::Enter);
    press(&mut screen, KeyCode::Enter);
    assert_eq!(screen.wizard().step(), 3);

    press(&mut screen, KeyCode::Enter);
    assert_eq!(screen.wizard().step(), 3);
    assert_eq!(screen.blocked_hint(), Some("Still needed: Course interest"));

    type_str(&mut screen, "Law");
    assert_eq!(screen.blocked_hint(), None);
    press(&mut screen, KeyCode::Enter);
    assert_eq!(screen.wizard().step(), 4);
    assert_eq!(screen.wizard().answers().get(Field::Interest), "Law");
}

#[test]
fn test_alt_enter_inserts_newline_in_text_step() {
    let mut screen = WizardScreen::default();
    press(&mut screen, KeyCode::Enter);
    press(&mut screen, KeyCode::Enter);

    type_str(&mut screen, "Law");
    screen.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT));
    type_str(&mut screen, "or medicine");

    assert_eq!(screen.wizard().step(), 3);
    assert_eq!(
        screen.wizard().answers().get(Field::Interest),
        "Law\nor medicine"
    );
}

#[test]
fn test_two_group_step_moves_focus_before_advancing() {
    let mut screen = WizardScreen::default();
    for _ in 0..2 {
        press(&mut screen, KeyCode::Enter);
    }
    type_str(&mut screen, "Nursing");
    for _ in 0..4 {
        press(&mut screen, KeyCode::Enter);
    }
    assert_eq!(screen.wizard().step(), 7);

    press(&mut screen, KeyCode::Down);
    press(&mut screen, KeyCode::Enter);
    assert_eq!(screen.wizard().step(), 7);
    assert_eq!(screen.focus(), 1);
    assert_eq!(screen.wizard().answers().get(Field::Timeline), "Next year");

    press(&mut screen, KeyCode::Enter);
    assert_eq!(screen.wizard().step(), 8);
    assert_eq!(screen.wizard().answers().get(Field::Passport), "Yes");
}

#[test]
fn test_esc_retreats_and_restores_highlight() {
    let mut screen = WizardScreen::default();
    press(&mut screen, KeyCode::Down);
    press(&mut screen, KeyCode::Down);
    press(&mut screen, KeyCode::Enter);
    assert_eq!(screen.wizard().step(), 2);

    press(&mut screen, KeyCode::Esc);
    assert_eq!(screen.wizard().step(), 1);
    assert_eq!(screen.highlighted(0), Some(2));
    assert_eq!(screen.wizard().answers().get(Field::Destination), "USA");

    press(&mut screen, KeyCode::Esc);
    assert_eq!(screen.wizard().step(), 1);
}

#[test]
fn test_contact_step_completes_and_requests_submit() {
    let mut screen = WizardScreen::default();
    drive_to_contact_step(&mut screen);

    type_str(&mut screen, "Amina Nakato");
    press(&mut screen, KeyCode::Tab);
    type_str(&mut screen, "amina@example.com");
    press(&mut screen, KeyCode::Enter);
    assert_eq!(screen.focus(), 2);

    // Phone still empty
    assert_eq!(press(&mut screen, KeyCode::Enter), ScreenAction::Continue);
    assert_eq!(screen.blocked_hint(), Some("Still needed: Phone / WhatsApp"));

    type_str(&mut screen, "+256 700 000 000");
    assert_eq!(press(&mut screen, KeyCode::Enter), ScreenAction::Submit);
    assert!(screen.wizard().is_completed());
    assert_eq!(screen.submission(), Some(&SubmissionStatus::Pending));
    assert_eq!(screen.wizard().answers().get(Field::Name), "Amina Nakato");
    assert_eq!(screen.wizard().answers().get(Field::Email), "amina@example.com");
}

#[test]
fn test_completion_screen_resets_after_delivery() {
    let mut screen = WizardScreen::default();
    drive_to_contact_step(&mut screen);
    type_str(&mut screen, "A");
    press(&mut screen, KeyCode::Tab);
    type_str(&mut screen, "a@b.c");
    press(&mut screen, KeyCode::Tab);
    type_str(&mut screen, "1");
    assert_eq!(press(&mut screen, KeyCode::Enter), ScreenAction::Submit);

    // Ignored while delivery is in flight
    press(&mut screen, KeyCode::Char('n'));
    assert!(screen.wizard().is_completed());

    screen.set_submission(SubmissionStatus::Done(SubmissionReport::default()));
    press(&mut screen, KeyCode::Char('n'));
    assert!(!screen.wizard().is_completed());
    assert_eq!(screen.wizard().step(), 1);
    assert_eq!(screen.wizard().answers().get(Field::Name), "");
    assert_eq!(screen.submission(), None);
}

#[test]
fn test_quit_keys() {
    let mut screen = WizardScreen::default();
    let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert_eq!(screen.handle_key(ctrl_c), ScreenAction::Quit);

    // Plain q is an ordinary key on a text step
    press(&mut screen, KeyCode::Enter);
    press(&mut screen, KeyCode::Enter);
    assert_eq!(press(&mut screen, KeyCode::Char('q')), ScreenAction::Continue);
    assert_eq!(screen.wizard().answers().get(Field::Interest), "q");
}

#[test]
fn test_render_step_card() {
    let mut screen = WizardScreen::default();
    let text = render_to_string(&mut screen);

    assert!(text.contains("Study Destination"));
    assert!(text.contains("Step 1 of 8"));
    assert!(text.contains("Where would you like to study?"));
    assert!(text.contains("United Kingdom"));
}

#[test]
fn test_render_completion_report() {
    let mut screen = WizardScreen::default();
    drive_to_contact_step(&mut screen);
    type_str(&mut screen, "A");
    press(&mut screen, KeyCode::Tab);
    type_str(&mut screen, "a@b.c");
    press(&mut screen, KeyCode::Tab);
    type_str(&mut screen, "1");
    press(&mut screen, KeyCode::Enter);

    screen.set_submission(SubmissionStatus::Done(SubmissionReport {
        delivered: vec![Delivery {
            sink: "outbox".to_string(),
            detail: "saved".to_string(),
        }],
        failed: Vec::new(),
    }));
    let text = render_to_string(&mut screen);

    assert!(text.contains("Success!"));
    assert!(text.contains("outbox: saved"));
}

#[test]
fn test_returning_to_text_step_keeps_trailing_newline() {
    let mut screen = WizardScreen::default();
    press(&mut screen, KeyCode::Enter);
    press(&mut screen, KeyCode::Enter);

    type_str(&mut screen, "Law");
    screen.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT));
    assert_eq!(screen.wizard().answers().get(Field::Interest), "Law\n");
    press(&mut screen, KeyCode::Enter);
    assert_eq!(screen.wizard().step(), 4);

    press(&mut screen, KeyCode::Esc);
    assert_eq!(screen.wizard().step(), 3);
    type_str(&mut screen, "x");
    assert_eq!(screen.wizard().answers().get(Field::Interest), "Law\nx");
}

#[test]
fn test_returning_to_contact_step_restores_entries() {
    let mut screen = WizardScreen::default();
    drive_to_contact_step(&mut screen);
    type_str(&mut screen, "Amina");

    press(&mut screen, KeyCode::Esc);
    assert_eq!(screen.wizard().step(), 7);
    press(&mut screen, KeyCode::Enter);
    press(&mut screen, KeyCode::Enter);
    assert_eq!(screen.wizard().step(), 8);
    assert_eq!(screen.focus(), 0);

    type_str(&mut screen, " Nakato");
    assert_eq!(screen.wizard().answers().get(Field::Name), "Amina Nakato");
    assert_eq!(screen.wizard().answers().get(Field::Interest), "Nursing");
}
