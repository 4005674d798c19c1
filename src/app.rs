use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    Frame, Terminal,
};
use std::time::Duration;

use crate::config::Config;
use crate::submission::{Inquiry, SubmissionService};
use crate::ui::{render_contact_panel, ScreenAction, SubmissionStatus, TerminalGuard, WizardScreen};

pub struct App {
    config: Config,
    screen: WizardScreen,
    service: SubmissionService,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Self {
        let service = SubmissionService::from_config(&config);
        tracing::info!(sinks = ?service.sink_names(), "Inquiry wizard starting");
        Self {
            config,
            screen: WizardScreen::default(),
            service,
            should_quit: false,
        }
    }

    pub fn screen(&self) -> &WizardScreen {
        &self.screen
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut guard = TerminalGuard::new()?;
        let terminal = guard.terminal_mut();

        let tick_rate = Duration::from_millis(self.config.ui.refresh_rate_ms);

        while !self.should_quit {
            terminal.draw(|f| self.render(f))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key, &mut *terminal).await?;
                    }
                }
            }
        }

        terminal.show_cursor()?;
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let (contact, wizard) = split_panels(area, self.config.ui.contact_panel_min_width);
        if let Some(contact) = contact {
            render_contact_panel(frame, contact, &self.config.office);
        }
        self.screen.render(frame, wizard);
    }

    async fn handle_key<B: Backend>(
        &mut self,
        key: KeyEvent,
        terminal: &mut Terminal<B>,
    ) -> Result<()> {
        match self.screen.handle_key(key) {
            ScreenAction::Continue => {}
            ScreenAction::Quit => self.should_quit = true,
            ScreenAction::Submit => {
                // Show the pending state while sinks run
                terminal.draw(|f| self.render(f))?;
                self.submit().await;
            }
        }
        Ok(())
    }

    /// Deliver the completed inquiry and record the outcome on the screen
    pub async fn submit(&mut self) {
        let status = match Inquiry::from_wizard(self.screen.wizard()) {
            Ok(inquiry) => {
                tracing::info!(inquiry = %inquiry.id, "Submitting inquiry");
                let report = self.service.submit(&inquiry).await;
                SubmissionStatus::Done(report)
            }
            Err(e) => {
                tracing::error!(error = %e, "Cannot submit inquiry");
                SubmissionStatus::Failed(e.to_string())
            }
        };
        self.screen.set_submission(status);
    }
}

/// Contact panel on the left when the terminal is wide enough
fn split_panels(area: Rect, min_width: u16) -> (Option<Rect>, Rect) {
    if area.width < min_width {
        return (None, area);
    }
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(38), Constraint::Percentage(62)])
        .split(area);
    (Some(chunks[0]), chunks[1])
}
