use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::models::City;
use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, city: City, gregorian: &str, hijri: &str) {
    let title_line = Line::from(vec![
        Span::styled("  سلام  ", theme::gold().add_modifier(Modifier::BOLD)),
        Span::styled("Salaam Clock", theme::gold()),
        Span::styled("  ·  ", theme::dim()),
        Span::styled(city.display_name(), theme::bold()),
    ]);

    let date_line = if gregorian.is_empty() {
        Line::from(Span::styled("loading…", theme::dim()))
    } else {
        Line::from(vec![
            Span::styled(format!("Gregorian: {}", gregorian), theme::dim()),
            Span::styled("  ·  ", theme::dim()),
            Span::styled(format!("Hijri: {}", hijri), theme::amber()),
        ])
    };

    let text = vec![title_line, Line::from(""), date_line];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::gold().add_modifier(Modifier::BOLD))
        .style(theme::base());

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
