use ratatui::{
    Frame,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem},
};

use crate::models::{PrayerName, ResolvedNext};
use crate::prayer_times::FetchedDay;
use crate::tui::theme;
use crate::utils::format::display_clock;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    day: Option<&FetchedDay>,
    next: Option<&ResolvedNext>,
    now_clock: &str,
) {
    let block = Block::default()
        .title(Span::styled(" Prayers ", theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::surface());

    let Some(day) = day else {
        let empty = List::new([ListItem::new(Line::from(Span::styled(
            "  No timetable loaded",
            theme::dim(),
        )))])
        .block(block);
        frame.render_widget(empty, area);
        return;
    };

    let items: Vec<ListItem> = PrayerName::day_order()
        .into_iter()
        .filter_map(|name| {
            let raw = day.timetable.raw(name)?;
            let time_str = display_clock(raw);
            let is_next = next.is_some_and(|n| !n.next_day && n.name == name);
            // Zero-padded HH:MM compares correctly as text.
            let is_past = time_str <= now_clock;

            let line = if is_next {
                Line::from(vec![
                    Span::styled(
                        format!("  {:<9}", name.display_name()),
                        theme::amber().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(format!("{:<7}", time_str), theme::amber()),
                    Span::styled("◄ next", theme::amber()),
                ])
            } else {
                let style = if is_past { theme::dim() } else { theme::bold() };
                Line::from(vec![
                    Span::styled(format!("  {:<9}", name.display_name()), style),
                    Span::styled(format!("{:<7}", time_str), theme::dim()),
                ])
            };
            Some(ListItem::new(line))
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}
