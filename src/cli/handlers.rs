use anyhow::Result;
use chrono::Local;
use std::str::FromStr;

use crate::config::AppConfig;
use crate::models::{City, PrayerName};
use crate::prayer_times::{AladhanClient, NextOccurrenceResolver, TimetableSource, remaining};
use crate::utils::format::{display_clock, format_countdown};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const AMBER: &str = "\x1b[33m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const GOLD: &str = "\x1b[38;2;196;160;68m";

fn pick_city(config: &AppConfig, arg: &Option<String>) -> Result<City> {
    match arg {
        Some(s) => City::from_str(s),
        None => Ok(config.city),
    }
}

fn resolver_from(config: &AppConfig) -> NextOccurrenceResolver {
    NextOccurrenceResolver::new(config.candidates()).offset_policy(config.offset_policy())
}

// ─── Times ───────────────────────────────────────────────────────────────────

pub fn handle_times(config: &AppConfig, city_arg: &Option<String>) -> Result<()> {
    let city = pick_city(config, city_arg)?;
    let day = AladhanClient::new(config.method)?.fetch(city)?;
    let now = Local::now().naive_local();

    println!();
    println_colored!(GOLD, "  Prayer Times — {} ({})", city, day.gregorian_date);
    println_colored!(DIM, "  Hijri: {}", day.hijri_date);
    println!();

    let next = resolver_from(config).resolve_next(&day.timetable, now)?;

    for name in PrayerName::day_order() {
        let Some(raw) = day.timetable.raw(name) else {
            continue;
        };
        let time_str = display_clock(raw);
        let is_next = !next.next_day && next.name == name;
        if is_next {
            println_colored!(AMBER, "  {:<10}  {}  ◄", name.display_name(), time_str);
        } else {
            println_colored!(BOLD, "  {:<10}  {}", name.display_name(), time_str);
        }
    }

    println!();
    println_colored!(
        AMBER,
        "  Next: {} in {}",
        next.label(),
        format_countdown(remaining(next.instant, now))
    );
    println!();
    Ok(())
}

// ─── Next ────────────────────────────────────────────────────────────────────

pub fn handle_next(config: &AppConfig, city_arg: &Option<String>) -> Result<()> {
    let city = pick_city(config, city_arg)?;
    let day = AladhanClient::new(config.method)?.fetch(city)?;
    let now = Local::now().naive_local();

    let next = resolver_from(config).resolve_next(&day.timetable, now)?;
    println!(
        "{} {} in {}",
        next.label(),
        next.instant.format("%H:%M"),
        format_countdown(remaining(next.instant, now))
    );
    Ok(())
}

// ─── Config ──────────────────────────────────────────────────────────────────

pub fn handle_config(config: &AppConfig) -> Result<()> {
    let path = AppConfig::config_path()?;
    println_colored!(DIM, "# {}", path.display());
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
