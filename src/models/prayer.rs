use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// The six named times Aladhan reports for a day, in fixed day order.
/// Sunrise is a reference mark, not a ritual prayer — it only becomes a
/// countdown candidate when the user opts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrayerName {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl PrayerName {
    /// All six names in day order, Sunrise included.
    pub fn day_order() -> [PrayerName; 6] {
        [
            PrayerName::Fajr,
            PrayerName::Sunrise,
            PrayerName::Dhuhr,
            PrayerName::Asr,
            PrayerName::Maghrib,
            PrayerName::Isha,
        ]
    }

    /// The five ritual prayers in day order — the default countdown candidates.
    pub fn ritual() -> [PrayerName; 5] {
        [
            PrayerName::Fajr,
            PrayerName::Dhuhr,
            PrayerName::Asr,
            PrayerName::Maghrib,
            PrayerName::Isha,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PrayerName::Fajr => "fajr",
            PrayerName::Sunrise => "sunrise",
            PrayerName::Dhuhr => "dhuhr",
            PrayerName::Asr => "asr",
            PrayerName::Maghrib => "maghrib",
            PrayerName::Isha => "isha",
        }
    }

    /// Name as the Aladhan API spells it in the `timings` object.
    pub fn api_key(&self) -> &'static str {
        match self {
            PrayerName::Fajr => "Fajr",
            PrayerName::Sunrise => "Sunrise",
            PrayerName::Dhuhr => "Dhuhr",
            PrayerName::Asr => "Asr",
            PrayerName::Maghrib => "Maghrib",
            PrayerName::Isha => "Isha",
        }
    }

    pub fn display_name(&self) -> &'static str {
        self.api_key()
    }
}

impl std::fmt::Display for PrayerName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for PrayerName {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fajr" => Ok(PrayerName::Fajr),
            "sunrise" => Ok(PrayerName::Sunrise),
            "dhuhr" | "zuhr" | "dhuhur" => Ok(PrayerName::Dhuhr),
            "asr" => Ok(PrayerName::Asr),
            "maghrib" => Ok(PrayerName::Maghrib),
            "isha" => Ok(PrayerName::Isha),
            _ => Err(anyhow::anyhow!("Unknown prayer name: {}", s)),
        }
    }
}

/// One day's named times for one city, exactly as the API sent them.
///
/// Values are raw strings ("05:12" or "05:12 (EET)") — parsing happens at
/// resolve time so a malformed entry surfaces as an error instead of being
/// normalized away here. Immutable once built; a refresh builds a new one.
#[derive(Debug, Clone, Default)]
pub struct DayTimetable {
    times: HashMap<PrayerName, String>,
}

impl DayTimetable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: PrayerName, raw: impl Into<String>) {
        self.times.insert(name, raw.into());
    }

    pub fn raw(&self, name: PrayerName) -> Option<&str> {
        self.times.get(&name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

impl FromIterator<(PrayerName, String)> for DayTimetable {
    fn from_iter<T: IntoIterator<Item = (PrayerName, String)>>(iter: T) -> Self {
        Self {
            times: iter.into_iter().collect(),
        }
    }
}

/// The soonest future prayer relative to some query instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedNext {
    pub name: PrayerName,
    pub instant: NaiveDateTime,
    /// True when every candidate today had passed and this is tomorrow's Fajr.
    pub next_day: bool,
}

impl ResolvedNext {
    /// "Fajr (Tomorrow)" for a wrapped result, plain name otherwise.
    pub fn label(&self) -> String {
        if self.next_day {
            format!("{} (Tomorrow)", self.name)
        } else {
            self.name.to_string()
        }
    }
}

/// Non-negative remaining time, decomposed for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Countdown {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Countdown {
    pub fn is_zero(&self) -> bool {
        self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }
}
