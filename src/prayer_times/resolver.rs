use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

use crate::models::{Countdown, DayTimetable, PrayerName, ResolvedNext};

/// Resolver failures are contract violations in the upstream data. Neither
/// is recoverable here — a silently wrong countdown target is worse than an
/// error, so nothing defaults.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("malformed time for {name}: {raw:?} (expected HH:MM)")]
    MalformedTime { name: PrayerName, raw: String },
    #[error("timetable has no Fajr entry (required as the next-day fallback)")]
    MissingFajr,
}

/// What to do with a trailing timezone annotation like "(EET)" or "(+03)".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetPolicy {
    /// Discard the annotation and treat the time as local wall clock.
    /// This is what the upstream data assumes when viewed in its own city.
    Ignore,
    /// Honor a numeric UTC offset annotation by shifting the candidate
    /// instant into the local wall clock. Non-numeric abbreviations are
    /// ambiguous and still discarded.
    Honor { local_offset_minutes: i32 },
}

/// Finds the soonest future entry in a day's timetable.
///
/// The candidate list is explicit because variants of this app disagreed on
/// whether Sunrise counts; callers pass the names that participate, in day
/// order. Pure function of its inputs — the clock is an argument, never read
/// ambiently.
#[derive(Debug, Clone)]
pub struct NextOccurrenceResolver {
    candidates: Vec<PrayerName>,
    offset_policy: OffsetPolicy,
}

impl NextOccurrenceResolver {
    pub fn new(candidates: impl Into<Vec<PrayerName>>) -> Self {
        Self {
            candidates: candidates.into(),
            offset_policy: OffsetPolicy::Ignore,
        }
    }

    /// The five ritual prayers, Sunrise excluded, annotations ignored.
    pub fn with_defaults() -> Self {
        Self::new(PrayerName::ritual())
    }

    pub fn offset_policy(mut self, policy: OffsetPolicy) -> Self {
        self.offset_policy = policy;
        self
    }

    /// Returns the first candidate strictly after `now`, or tomorrow's Fajr
    /// when every candidate today has passed. Exactly one result for any
    /// well-formed timetable; an exact match to the current second has
    /// already started and is not "next".
    ///
    /// Every candidate entry is parsed before the scan, so a malformed
    /// entry fails the whole resolve even when it would not have been the
    /// returned one.
    pub fn resolve_next(
        &self,
        timetable: &DayTimetable,
        now: NaiveDateTime,
    ) -> Result<ResolvedNext, ResolveError> {
        let fajr_raw = timetable
            .raw(PrayerName::Fajr)
            .ok_or(ResolveError::MissingFajr)?;
        let fajr = self.parse_clock(PrayerName::Fajr, fajr_raw)?;

        // Upstream only guarantees Fajr; absent candidates are skipped,
        // malformed ones are not.
        let mut parsed: Vec<(PrayerName, ParsedClock)> =
            Vec::with_capacity(self.candidates.len());
        for name in &self.candidates {
            if let Some(raw) = timetable.raw(*name) {
                parsed.push((*name, self.parse_clock(*name, raw)?));
            }
        }

        let today = now.date();
        for (name, clock) in &parsed {
            let instant = clock.instant_on(today);
            if instant > now {
                return Ok(ResolvedNext {
                    name: *name,
                    instant,
                    next_day: false,
                });
            }
        }

        let tomorrow = today.succ_opt().unwrap_or(today);
        Ok(ResolvedNext {
            name: PrayerName::Fajr,
            instant: fajr.instant_on(tomorrow),
            next_day: true,
        })
    }

    fn parse_clock(&self, name: PrayerName, raw: &str) -> Result<ParsedClock, ResolveError> {
        let malformed = || ResolveError::MalformedTime {
            name,
            raw: raw.to_string(),
        };

        // "05:12 (EET)" — everything after the first space is annotation.
        let mut pieces = raw.trim().splitn(2, ' ');
        let hhmm = pieces.next().ok_or_else(malformed)?;
        let annotation = pieces.next();

        let (hh, mm) = hhmm.split_once(':').ok_or_else(malformed)?;
        let hour = parse_two_digit(hh).ok_or_else(malformed)?;
        let minute = parse_two_digit(mm).ok_or_else(malformed)?;
        let time = NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(malformed)?;

        let shift = match self.offset_policy {
            OffsetPolicy::Ignore => Duration::zero(),
            OffsetPolicy::Honor {
                local_offset_minutes,
            } => match annotation.and_then(annotation_offset_minutes) {
                Some(annotated) => Duration::minutes((local_offset_minutes - annotated) as i64),
                None => Duration::zero(),
            },
        };

        Ok(ParsedClock { time, shift })
    }
}

/// A parsed HH:MM plus the wall-clock shift implied by the offset policy.
/// The shift is applied to the full date-time so a shift across midnight
/// moves the day as well.
#[derive(Debug, Clone, Copy)]
struct ParsedClock {
    time: NaiveTime,
    shift: Duration,
}

impl ParsedClock {
    fn instant_on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.time) + self.shift
    }
}

/// Strictly-numeric parse; rejects signs and whitespace that integer
/// FromStr would accept.
fn parse_two_digit(s: &str) -> Option<u32> {
    if s.is_empty() || s.len() > 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// "(+03)" -> 180, "(-04:30)" -> -270, "(EET)" -> None.
fn annotation_offset_minutes(annotation: &str) -> Option<i32> {
    let inner = annotation
        .trim()
        .strip_prefix('(')?
        .strip_suffix(')')?
        .trim();
    let (sign, rest) = match inner.as_bytes().first()? {
        b'+' => (1, &inner[1..]),
        b'-' => (-1, &inner[1..]),
        _ => return None,
    };
    let (hh, mm) = match rest.split_once(':') {
        Some((h, m)) => (parse_two_digit(h)?, parse_two_digit(m)?),
        None => (parse_two_digit(rest)?, 0),
    };
    if mm > 59 {
        return None;
    }
    Some(sign * (hh as i32 * 60 + mm as i32))
}

/// Clamped remaining time to `target`: `max(0, target - now)` decomposed by
/// floor division. All components zero once the target is reached.
pub fn remaining(target: NaiveDateTime, now: NaiveDateTime) -> Countdown {
    let secs = (target - now).num_seconds().max(0);
    Countdown {
        hours: secs / 3600,
        minutes: (secs % 3600) / 60,
        seconds: secs % 60,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timetable() -> DayTimetable {
        [
            (PrayerName::Fajr, "05:00".to_string()),
            (PrayerName::Sunrise, "06:20".to_string()),
            (PrayerName::Dhuhr, "12:15".to_string()),
            (PrayerName::Asr, "15:30".to_string()),
            (PrayerName::Maghrib, "18:45".to_string()),
            (PrayerName::Isha, "20:00".to_string()),
        ]
        .into_iter()
        .collect()
    }

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn picks_first_strictly_future_candidate() {
        let resolver = NextOccurrenceResolver::with_defaults();
        let next = resolver.resolve_next(&timetable(), at(4, 0, 0)).unwrap();
        assert_eq!(next.name, PrayerName::Fajr);
        assert_eq!(next.instant, at(5, 0, 0));
        assert!(!next.next_day);

        let next = resolver.resolve_next(&timetable(), at(13, 0, 0)).unwrap();
        assert_eq!(next.name, PrayerName::Asr);
    }

    #[test]
    fn exact_match_is_not_next() {
        // Dhuhr at 12:15:00 exactly has already started; Asr is next.
        let resolver = NextOccurrenceResolver::with_defaults();
        let next = resolver.resolve_next(&timetable(), at(12, 15, 0)).unwrap();
        assert_eq!(next.name, PrayerName::Asr);
        assert_eq!(next.instant, at(15, 30, 0));
    }

    #[test]
    fn one_second_before_still_selects() {
        let resolver = NextOccurrenceResolver::with_defaults();
        let next = resolver.resolve_next(&timetable(), at(12, 14, 59)).unwrap();
        assert_eq!(next.name, PrayerName::Dhuhr);
    }

    #[test]
    fn wraps_to_tomorrows_fajr_after_isha() {
        let resolver = NextOccurrenceResolver::with_defaults();
        let next = resolver.resolve_next(&timetable(), at(21, 0, 0)).unwrap();
        assert_eq!(next.name, PrayerName::Fajr);
        assert!(next.next_day);
        assert_eq!(
            next.instant,
            NaiveDate::from_ymd_opt(2024, 3, 11)
                .unwrap()
                .and_hms_opt(5, 0, 0)
                .unwrap()
        );
        assert_eq!(next.label(), "Fajr (Tomorrow)");
    }

    #[test]
    fn exact_isha_wraps_too() {
        let resolver = NextOccurrenceResolver::with_defaults();
        let next = resolver.resolve_next(&timetable(), at(20, 0, 0)).unwrap();
        assert_eq!(next.name, PrayerName::Fajr);
        assert!(next.next_day);
    }

    #[test]
    fn sunrise_excluded_by_default_included_on_request() {
        let noon_less = at(6, 0, 0);

        let default = NextOccurrenceResolver::with_defaults();
        let next = default.resolve_next(&timetable(), noon_less).unwrap();
        assert_eq!(next.name, PrayerName::Dhuhr);

        let with_sunrise = NextOccurrenceResolver::new(PrayerName::day_order());
        let next = with_sunrise.resolve_next(&timetable(), noon_less).unwrap();
        assert_eq!(next.name, PrayerName::Sunrise);
    }

    #[test]
    fn idempotent_for_same_inputs() {
        let resolver = NextOccurrenceResolver::with_defaults();
        let tt = timetable();
        let now = at(17, 3, 21);
        assert_eq!(
            resolver.resolve_next(&tt, now).unwrap(),
            resolver.resolve_next(&tt, now).unwrap()
        );
    }

    #[test]
    fn trailing_annotation_is_stripped() {
        let mut tt = timetable();
        tt.insert(PrayerName::Maghrib, "18:45 (EET)");
        let resolver = NextOccurrenceResolver::with_defaults();
        let next = resolver.resolve_next(&tt, at(16, 0, 0)).unwrap();
        assert_eq!(next.name, PrayerName::Maghrib);
        assert_eq!(next.instant, at(18, 45, 0));
    }

    #[test]
    fn malformed_entry_fails_even_when_not_the_answer() {
        let mut tt = timetable();
        tt.insert(PrayerName::Dhuhr, "noon");
        let resolver = NextOccurrenceResolver::with_defaults();
        // Dhuhr has long passed at 19:00 but the timetable is still invalid.
        let err = resolver.resolve_next(&tt, at(19, 0, 0)).unwrap_err();
        assert_eq!(
            err,
            ResolveError::MalformedTime {
                name: PrayerName::Dhuhr,
                raw: "noon".to_string()
            }
        );
    }

    #[test]
    fn out_of_range_components_are_malformed() {
        let resolver = NextOccurrenceResolver::with_defaults();
        for bad in ["24:00", "12:60", "1e:05", "+2:05", "12", "12:5x", ""] {
            let mut tt = timetable();
            tt.insert(PrayerName::Asr, bad);
            assert!(
                resolver.resolve_next(&tt, at(0, 0, 0)).is_err(),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn missing_fajr_is_an_error() {
        let mut tt = DayTimetable::new();
        tt.insert(PrayerName::Isha, "20:00");
        let resolver = NextOccurrenceResolver::with_defaults();
        assert_eq!(
            resolver.resolve_next(&tt, at(1, 0, 0)).unwrap_err(),
            ResolveError::MissingFajr
        );
    }

    #[test]
    fn missing_non_fajr_candidates_are_skipped() {
        let mut tt = DayTimetable::new();
        tt.insert(PrayerName::Fajr, "05:00");
        tt.insert(PrayerName::Isha, "20:00");
        let resolver = NextOccurrenceResolver::with_defaults();
        let next = resolver.resolve_next(&tt, at(8, 0, 0)).unwrap();
        assert_eq!(next.name, PrayerName::Isha);
    }

    #[test]
    fn numeric_offset_honored_when_policy_says_so() {
        let mut tt = timetable();
        // Isha quoted in a zone one hour east of us: 20:00 (+04) is 19:00 local.
        tt.insert(PrayerName::Isha, "20:00 (+04)");
        let resolver = NextOccurrenceResolver::with_defaults().offset_policy(
            OffsetPolicy::Honor {
                local_offset_minutes: 180,
            },
        );
        let next = resolver.resolve_next(&tt, at(18, 50, 0)).unwrap();
        assert_eq!(next.name, PrayerName::Isha);
        assert_eq!(next.instant, at(19, 0, 0));
    }

    #[test]
    fn non_numeric_annotation_discarded_under_honor_policy() {
        let mut tt = timetable();
        tt.insert(PrayerName::Isha, "20:00 (AST)");
        let resolver = NextOccurrenceResolver::with_defaults().offset_policy(
            OffsetPolicy::Honor {
                local_offset_minutes: 180,
            },
        );
        let next = resolver.resolve_next(&tt, at(19, 30, 0)).unwrap();
        assert_eq!(next.instant, at(20, 0, 0));
    }

    #[test]
    fn annotation_offsets_parse() {
        assert_eq!(annotation_offset_minutes("(+03)"), Some(180));
        assert_eq!(annotation_offset_minutes("(-04:30)"), Some(-270));
        assert_eq!(annotation_offset_minutes("(+0:15)"), Some(15));
        assert_eq!(annotation_offset_minutes("(EET)"), None);
        assert_eq!(annotation_offset_minutes("(+3:99)"), None);
        assert_eq!(annotation_offset_minutes("+03"), None);
    }

    #[test]
    fn remaining_decomposes_with_floor_division() {
        let c = remaining(at(5, 0, 0), at(2, 30, 15));
        assert_eq!((c.hours, c.minutes, c.seconds), (2, 29, 45));
    }

    #[test]
    fn remaining_clamps_to_zero() {
        let c = remaining(at(5, 0, 0), at(5, 0, 0));
        assert!(c.is_zero());
        let c = remaining(at(5, 0, 0), at(6, 0, 0));
        assert!(c.is_zero());
    }

    #[test]
    fn worked_examples_hold() {
        let resolver = NextOccurrenceResolver::with_defaults();

        // 12:15:00 exactly -> Asr at 15:30 today.
        let next = resolver.resolve_next(&timetable(), at(12, 15, 0)).unwrap();
        assert_eq!((next.name, next.next_day), (PrayerName::Asr, false));

        // 21:00:00 -> Fajr tomorrow, 8h 0m 0s away.
        let next = resolver.resolve_next(&timetable(), at(21, 0, 0)).unwrap();
        let c = remaining(next.instant, at(21, 0, 0));
        assert_eq!((c.hours, c.minutes, c.seconds), (8, 0, 0));
    }
}
