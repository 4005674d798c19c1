//! Static contact-info panel shown beside the wizard

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::config::OfficeConfig;

/// Styled lines for the panel body
pub fn contact_lines(office: &OfficeConfig) -> Vec<Line<'_>> {
    let heading = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);
    let muted = Style::default().fg(Color::Gray);

    let mut lines = vec![
        Line::from(Span::styled(
            office.headline.as_str(),
            heading.fg(Color::LightCyan),
        )),
        Line::from(""),
        Line::from(Span::styled(office.tagline.as_str(), muted)),
        Line::from(""),
        Line::from(Span::styled(office.office_name.as_str(), heading)),
    ];
    lines.extend(
        office
            .address
            .iter()
            .map(|line| Line::from(Span::styled(line.as_str(), muted))),
    );
    lines.push(Line::from(""));
    lines.extend(office.phones.iter().map(|phone| {
        Line::from(vec![
            Span::styled("Tel  ", Style::default().fg(Color::DarkGray)),
            Span::raw(phone.as_str()),
        ])
    }));
    lines.push(Line::from(vec![
        Span::styled("Mail ", Style::default().fg(Color::DarkGray)),
        Span::raw(office.email.as_str()),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        office.emergency_title.as_str(),
        heading.fg(Color::Yellow),
    )));
    lines.push(Line::from(Span::styled(office.emergency_note.as_str(), muted)));
    lines
}

/// Plain-text rendering for the `contact` command
pub fn contact_text(office: &OfficeConfig) -> String {
    contact_lines(office)
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_contact_panel(frame: &mut Frame, area: Rect, office: &OfficeConfig) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let para = Paragraph::new(contact_lines(office))
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(para, area);
}
