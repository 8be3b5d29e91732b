use anyhow::Result;
use chrono::Local;
use crossterm::event::{KeyCode, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    widgets::Block,
};

use crate::config::AppConfig;
use crate::models::{City, Countdown, ResolvedNext};
use crate::prayer_times::{
    AladhanClient, FetchedDay, NextOccurrenceResolver, TimetableSource, remaining,
};
use crate::tui::events::{Event, EventHandler};
use crate::tui::theme;
use crate::tui::widgets::{countdown, header, prayers, statusbar};

pub struct App {
    pub config: AppConfig,
    pub city: City,
    pub should_quit: bool,

    resolver: NextOccurrenceResolver,

    // The current immutable timetable; replaced wholesale on refresh.
    pub day: Option<FetchedDay>,
    pub next: Option<ResolvedNext>,
    pub countdown: Countdown,
    pub error: Option<String>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let resolver =
            NextOccurrenceResolver::new(config.candidates()).offset_policy(config.offset_policy());
        let city = config.city;
        App {
            config,
            city,
            should_quit: false,
            resolver,
            day: None,
            next: None,
            countdown: Countdown::default(),
            error: None,
        }
    }

    /// Fetch a fresh timetable for the active city. On failure the last
    /// good timetable stays on screen under an error banner.
    pub fn load(&mut self, source: &dyn TimetableSource) {
        match source.fetch(self.city) {
            Ok(day) => {
                self.day = Some(day);
                self.error = None;
                self.tick();
            }
            Err(e) => {
                log::warn!("fetch failed for {}: {:#}", self.city, e);
                self.error = Some(e.to_string());
            }
        }
    }

    /// Recompute next prayer + countdown against the current clock.
    pub fn tick(&mut self) {
        let Some(day) = &self.day else {
            return;
        };
        let now = Local::now().naive_local();
        match self.resolver.resolve_next(&day.timetable, now) {
            Ok(next) => {
                self.next = Some(next);
                self.countdown = remaining(next.instant, now);
            }
            Err(e) => {
                log::warn!("resolve failed: {}", e);
                self.next = None;
                self.error = Some(e.to_string());
            }
        }
    }

    pub fn handle_key(&mut self, key: crossterm::event::KeyEvent, source: &dyn TimetableSource) {
        // Only handle actual key presses — ignore release/repeat events
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.city = self.city.toggled();
                self.load(source);
            }
            KeyCode::Char('r') => {
                self.load(source);
            }
            _ => {}
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(theme::base()), area);

        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // header
                Constraint::Min(0),    // body
                Constraint::Length(1), // status bar
            ])
            .split(area);

        let (gregorian, hijri) = self
            .day
            .as_ref()
            .map(|d| (d.gregorian_date.as_str(), d.hijri_date.as_str()))
            .unwrap_or(("", ""));
        header::render(frame, outer[0], self.city, gregorian, hijri);
        statusbar::render(frame, outer[2]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(outer[1]);

        let now_clock = Local::now().format("%H:%M").to_string();
        prayers::render(
            frame,
            columns[0],
            self.day.as_ref(),
            self.next.as_ref(),
            &now_clock,
        );
        countdown::render(
            frame,
            columns[1],
            self.next.as_ref(),
            self.countdown,
            self.error.as_deref(),
        );
    }
}

pub fn run(config: AppConfig) -> Result<()> {
    let source = AladhanClient::new(config.method)?;
    let mut app = App::new(config);
    app.load(&source);

    let mut terminal = ratatui::init();
    let mut events = EventHandler::new(app.config.effective_tick_ms());

    loop {
        terminal.draw(|frame| app.draw(frame))?;

        match events.next()? {
            Event::Key(key) => {
                app.handle_key(key, &source);
                if app.should_quit {
                    break;
                }
            }
            Event::Tick => {
                app.tick();
            }
        }
    }

    events.stop();
    ratatui::restore();
    Ok(())
}
