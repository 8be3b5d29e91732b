pub mod city;
pub mod prayer;

pub use city::City;
pub use prayer::{Countdown, DayTimetable, PrayerName, ResolvedNext};
