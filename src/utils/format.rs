use crate::models::Countdown;

/// "8h 0m 0s" — the countdown text, seconds always shown so the display
/// visibly ticks.
pub fn format_countdown(c: Countdown) -> String {
    format!("{}h {}m {}s", c.hours, c.minutes, c.seconds)
}

/// Just the HH:MM part of a raw timetable entry, annotation dropped.
pub fn display_clock(raw: &str) -> &str {
    raw.split_whitespace().next().unwrap_or(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_keeps_zero_fields() {
        let c = Countdown {
            hours: 8,
            minutes: 0,
            seconds: 0,
        };
        assert_eq!(format_countdown(c), "8h 0m 0s");
    }

    #[test]
    fn clock_display_strips_annotation() {
        assert_eq!(display_clock("18:17 (+03)"), "18:17");
        assert_eq!(display_clock("18:17"), "18:17");
    }
}
