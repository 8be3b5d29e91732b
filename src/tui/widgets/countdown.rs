use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::models::{Countdown, ResolvedNext};
use crate::tui::theme;
use crate::utils::format::format_countdown;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    next: Option<&ResolvedNext>,
    countdown: Countdown,
    error: Option<&str>,
) {
    let block = Block::default()
        .title(Span::styled(" Next Prayer ", theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::surface());

    let content: Vec<Line> = if let Some(msg) = error {
        vec![
            Line::from(""),
            Line::from(Span::styled("  Error loading timings", theme::red())),
            Line::from(Span::styled(format!("  {}", msg), theme::dim())),
            Line::from(""),
            Line::from(Span::styled("  [r] to retry", theme::dim())),
        ]
    } else {
        match next {
            None => vec![
                Line::from(""),
                Line::from(Span::styled("  No data", theme::dim())),
            ],
            Some(next) => vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("  {}", next.label().to_uppercase()),
                    theme::gold().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!("  at {}", next.instant.format("%H:%M")),
                    theme::dim(),
                )),
                Line::from(""),
                Line::from(vec![
                    Span::styled("  in  ", theme::dim()),
                    Span::styled(
                        format_countdown(countdown),
                        theme::amber().add_modifier(Modifier::BOLD),
                    ),
                ]),
            ],
        }
    };

    let paragraph = Paragraph::new(content)
        .block(block)
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, area);
}
