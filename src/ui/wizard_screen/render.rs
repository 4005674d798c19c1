//! Step card and completion screen rendering

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap},
    Frame,
};

use super::{SubmissionStatus, WizardScreen};
use crate::wizard::{ChoiceGroup, StepInput};

const SUCCESS_MESSAGE: &str =
    "Great! Our study abroad advisor will reach out soon to help you plan your journey.";

fn key_style(enabled: bool) -> Style {
    if enabled {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

impl WizardScreen {
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.wizard.is_completed() {
            self.render_completion(frame, area);
        } else {
            self.render_step(frame, area);
        }
    }

    fn render_step(&mut self, frame: &mut Frame, area: Rect) {
        let step = self.wizard.current().clone();

        let block = Block::default()
            .title(format!(
                " {} — Step {} of {} ",
                step.title,
                self.wizard.step(),
                self.wizard.total_steps()
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(1), // Progress
                Constraint::Length(1), // Spacer
                Constraint::Length(1), // Heading
                Constraint::Length(2), // Intro
                Constraint::Length(2), // Subtitle
                Constraint::Min(4),    // Input
                Constraint::Length(1), // Hint
                Constraint::Length(1), // Footer
            ])
            .split(inner);

        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
            .ratio(self.wizard.progress().clamp(0.0, 1.0))
            .label(format!(
                "{}/{}",
                self.wizard.step(),
                self.wizard.total_steps()
            ));
        frame.render_widget(gauge, chunks[0]);

        let heading = Paragraph::new(Line::from(Span::styled(
            step.heading,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )));
        frame.render_widget(heading, chunks[2]);

        let intro = Paragraph::new(Span::styled(step.intro, Style::default().fg(Color::Gray)))
            .wrap(Wrap { trim: true });
        frame.render_widget(intro, chunks[3]);

        let subtitle = Paragraph::new(Span::styled(
            step.subtitle,
            Style::default().fg(Color::LightCyan),
        ));
        frame.render_widget(subtitle, chunks[4]);

        match &step.input {
            StepInput::Choice { groups } => self.render_choices(frame, chunks[5], groups),
            StepInput::Text { .. } => {
                self.textarea.set_block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Cyan)),
                );
                frame.render_widget(&self.textarea, chunks[5]);
            }
            StepInput::Fields { entries } => {
                let rows = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints(
                        entries
                            .iter()
                            .map(|_| Constraint::Length(3))
                            .chain(std::iter::once(Constraint::Min(0)))
                            .collect::<Vec<_>>(),
                    )
                    .split(chunks[5]);
                for (i, input) in self.entries.iter().enumerate() {
                    input.render(frame, rows[i], i == self.focus);
                }
            }
        }

        if let Some(hint) = &self.blocked_hint {
            let hint = Paragraph::new(Span::styled(hint.as_str(), Style::default().fg(Color::Red)));
            frame.render_widget(hint, chunks[6]);
        }

        let footer = Paragraph::new(self.footer_line(&step.input)).alignment(Alignment::Center);
        frame.render_widget(footer, chunks[7]);
    }

    fn render_choices(&mut self, frame: &mut Frame, area: Rect, groups: &[ChoiceGroup]) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(
                groups
                    .iter()
                    .map(|_| Constraint::Ratio(1, groups.len() as u32))
                    .collect::<Vec<_>>(),
            )
            .split(area);

        for (i, group) in groups.iter().enumerate() {
            let chosen = self.wizard.answers().get(group.field);
            let items: Vec<ListItem> = group
                .options
                .iter()
                .map(|option| {
                    let (marker, style) = if *option == chosen {
                        ("(•) ", Style::default().fg(Color::Green))
                    } else {
                        ("( ) ", Style::default().fg(Color::Gray))
                    };
                    ListItem::new(Line::from(vec![
                        Span::styled(marker, style),
                        Span::styled(*option, style),
                    ]))
                })
                .collect();

            let focused = i == self.focus;
            let mut block = Block::default().borders(Borders::ALL).border_style(
                Style::default().fg(if focused { Color::Cyan } else { Color::DarkGray }),
            );
            if let Some(label) = group.label {
                block = block.title(format!(" {label} "));
            }

            let highlight = if focused {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };
            let list = List::new(items)
                .block(block)
                .highlight_style(highlight)
                .highlight_symbol("> ");

            frame.render_stateful_widget(list, columns[i], &mut self.choice_states[i]);
        }
    }

    fn footer_line(&self, input: &StepInput) -> Line<'static> {
        let next_label = if self.wizard.is_last_step() {
            " Complete inquiry  "
        } else {
            " Next  "
        };
        let can_advance = self.wizard.is_step_valid();
        let can_retreat = self.wizard.step() > 1;

        let mut spans = Vec::new();
        match input {
            StepInput::Choice { .. } => {
                spans.push(Span::styled("[↑↓]", key_style(true)));
                spans.push(Span::raw(" Move  "));
                spans.push(Span::styled("[Space]", key_style(true)));
                spans.push(Span::raw(" Select  "));
            }
            StepInput::Text { .. } => {
                spans.push(Span::styled("[Alt+Enter]", key_style(true)));
                spans.push(Span::raw(" New line  "));
            }
            StepInput::Fields { .. } => {
                spans.push(Span::styled("[Tab]", key_style(true)));
                spans.push(Span::raw(" Next field  "));
            }
        }
        spans.push(Span::styled("[Enter]", key_style(can_advance)));
        spans.push(Span::styled(
            next_label,
            Style::default().fg(if can_advance {
                Color::White
            } else {
                Color::DarkGray
            }),
        ));
        spans.push(Span::styled("[Esc]", key_style(can_retreat)));
        spans.push(Span::raw(" Back  "));
        spans.push(Span::styled("[Ctrl+C]", key_style(true)));
        spans.push(Span::raw(" Quit"));
        Line::from(spans)
    }

    fn render_completion(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Inquiry Complete ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(2), // Title
                Constraint::Length(3), // Message
                Constraint::Min(3),    // Delivery report
                Constraint::Length(1), // Footer
            ])
            .split(inner);

        let title = Paragraph::new(Line::from(Span::styled(
            "Success!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(title, chunks[0]);

        let message = Paragraph::new(SUCCESS_MESSAGE)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(message, chunks[1]);

        let report = Paragraph::new(self.status_lines()).wrap(Wrap { trim: false });
        frame.render_widget(report, chunks[2]);

        let pending = matches!(self.submission, Some(SubmissionStatus::Pending));
        let footer = Paragraph::new(Line::from(vec![
            Span::styled("[Enter]", key_style(!pending)),
            Span::raw(" New inquiry  "),
            Span::styled("[q]", key_style(true)),
            Span::raw(" Quit"),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(footer, chunks[3]);
    }

    fn status_lines(&self) -> Vec<Line<'static>> {
        let muted = Style::default().fg(Color::Gray);
        match &self.submission {
            None => Vec::new(),
            Some(SubmissionStatus::Pending) => {
                vec![Line::from(Span::styled("Sending your inquiry...", muted))]
            }
            Some(SubmissionStatus::Failed(error)) => vec![Line::from(Span::styled(
                format!("Could not send inquiry: {error}"),
                Style::default().fg(Color::Red),
            ))],
            Some(SubmissionStatus::Done(report)) => {
                let mut lines: Vec<Line> = report
                    .delivered
                    .iter()
                    .map(|d| {
                        Line::from(vec![
                            Span::styled("  ✓ ", Style::default().fg(Color::Green)),
                            Span::styled(format!("{}: ", d.sink), muted),
                            Span::raw(d.detail.clone()),
                        ])
                    })
                    .collect();
                lines.extend(report.failed.iter().map(|d| {
                    Line::from(vec![
                        Span::styled("  ✗ ", Style::default().fg(Color::Red)),
                        Span::styled(format!("{}: ", d.sink), muted),
                        Span::raw(d.detail.clone()),
                    ])
                }));
                if lines.is_empty() {
                    lines.push(Line::from(Span::styled(
                        "No delivery targets are configured; the inquiry was not saved.",
                        Style::default().fg(Color::Yellow),
                    )));
                }
                lines
            }
        }
    }
}
