use ratatui::style::{Color, Modifier, Style};

pub const BG: Color = Color::Rgb(16, 17, 20);
pub const SURFACE: Color = Color::Rgb(24, 26, 30);
pub const BORDER: Color = Color::Rgb(52, 56, 62);
pub const TEXT: Color = Color::Rgb(222, 222, 210);
pub const TEXT_DIM: Color = Color::Rgb(118, 122, 112);
pub const GOLD: Color = Color::Rgb(202, 166, 74);
pub const AMBER: Color = Color::Rgb(214, 142, 64);
pub const RED: Color = Color::Rgb(186, 86, 66);

pub fn base() -> Style {
    Style::default().fg(TEXT).bg(BG)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn gold() -> Style {
    Style::default().fg(GOLD)
}

pub fn amber() -> Style {
    Style::default().fg(AMBER)
}

pub fn red() -> Style {
    Style::default().fg(RED)
}

pub fn bold() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}

pub fn surface() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

pub fn border() -> Style {
    Style::default().fg(BORDER)
}
