use anyhow::{Result, anyhow};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::models::{City, DayTimetable, PrayerName};

const ALADHAN_BASE_URL: &str = "https://api.aladhan.com/v1/timingsByCity";
const COUNTRY: &str = "Saudi Arabia";
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// One fetched day: the timetable plus the display strings that ride along
/// with it. Dates are shown verbatim as the API formats them.
#[derive(Debug, Clone)]
pub struct FetchedDay {
    pub city: City,
    pub timetable: DayTimetable,
    pub gregorian_date: String,
    pub hijri_date: String,
}

/// Where timetables come from. The TUI and the tests drive the same code
/// through this seam; production uses [`AladhanClient`].
pub trait TimetableSource {
    fn fetch(&self, city: City) -> Result<FetchedDay>;
}

/// Blocking client for the Aladhan `timingsByCity` endpoint.
pub struct AladhanClient {
    http: reqwest::blocking::Client,
    base_url: String,
    method: u32,
}

impl AladhanClient {
    /// `method` is the Aladhan calculation-method id (2 = ISNA, the value
    /// this app has always used).
    pub fn new(method: u32) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: ALADHAN_BASE_URL.to_string(),
            method,
        })
    }
}

impl TimetableSource for AladhanClient {
    fn fetch(&self, city: City) -> Result<FetchedDay> {
        log::debug!("fetching timings for {} from {}", city, self.base_url);

        let envelope: Envelope = self
            .http
            .get(&self.base_url)
            .query(&[
                ("city", city.query_name()),
                ("country", COUNTRY),
                ("method", &self.method.to_string()),
            ])
            .send()?
            .error_for_status()?
            .json()?;

        if envelope.code != 200 {
            return Err(anyhow!("Aladhan returned code {}", envelope.code));
        }
        let payload = envelope
            .data
            .ok_or_else(|| anyhow!("Aladhan response has no data"))?;

        day_from_payload(city, payload)
    }
}

fn day_from_payload(city: City, payload: Payload) -> Result<FetchedDay> {
    let mut timetable = DayTimetable::new();
    for name in PrayerName::day_order() {
        if let Some(raw) = payload.timings.get(name.api_key()) {
            timetable.insert(name, raw.clone());
        }
    }
    if timetable.is_empty() {
        return Err(anyhow!("Aladhan response has no recognizable timings"));
    }

    let hijri = payload.date.hijri;
    Ok(FetchedDay {
        city,
        timetable,
        gregorian_date: payload.date.gregorian.date,
        hijri_date: format!("{} ({} {})", hijri.date, hijri.month.en, hijri.year),
    })
}

// Just the fields we read; the API sends far more.

#[derive(Debug, Deserialize)]
struct Envelope {
    code: u16,
    #[serde(default)]
    data: Option<Payload>,
}

#[derive(Debug, Deserialize)]
struct Payload {
    timings: HashMap<String, String>,
    date: DateInfo,
}

#[derive(Debug, Deserialize)]
struct DateInfo {
    gregorian: GregorianDate,
    hijri: HijriDate,
}

#[derive(Debug, Deserialize)]
struct GregorianDate {
    date: String,
}

#[derive(Debug, Deserialize)]
struct HijriDate {
    date: String,
    month: HijriMonth,
    year: String,
}

#[derive(Debug, Deserialize)]
struct HijriMonth {
    en: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "code": 200,
        "status": "OK",
        "data": {
            "timings": {
                "Fajr": "05:07",
                "Sunrise": "06:26",
                "Dhuhr": "12:22",
                "Asr": "15:44",
                "Sunset": "18:17",
                "Maghrib": "18:17 (+03)",
                "Isha": "19:47",
                "Midnight": "00:22"
            },
            "date": {
                "readable": "10 Mar 2024",
                "gregorian": { "date": "10-03-2024" },
                "hijri": {
                    "date": "29-08-1445",
                    "month": { "en": "Sha'ban" },
                    "year": "1445"
                }
            }
        }
    }"#;

    #[test]
    fn payload_becomes_day() {
        let envelope: Envelope = serde_json::from_str(SAMPLE).unwrap();
        let day = day_from_payload(City::Makkah, envelope.data.unwrap()).unwrap();

        assert_eq!(day.timetable.raw(PrayerName::Fajr), Some("05:07"));
        assert_eq!(day.timetable.raw(PrayerName::Maghrib), Some("18:17 (+03)"));
        // Extra keys like Sunset and Midnight are not carried over.
        assert_eq!(day.gregorian_date, "10-03-2024");
        assert_eq!(day.hijri_date, "29-08-1445 (Sha'ban 1445)");
    }

    #[test]
    fn non_200_code_is_rejected() {
        let envelope: Envelope =
            serde_json::from_str(r#"{"code": 404, "status": "Not Found"}"#).unwrap();
        assert_eq!(envelope.code, 404);
        assert!(envelope.data.is_none());
    }
}
