use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::{City, PrayerName};
use crate::prayer_times::OffsetPolicy;

fn default_city() -> City {
    City::Makkah
}
fn default_method() -> u32 {
    2
}
fn default_tick_ms() -> u64 {
    500
}
fn default_local_offset() -> i32 {
    180
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// City shown on startup; Tab in the TUI switches to the other one.
    #[serde(default = "default_city")]
    pub city: City,
    /// Aladhan calculation method id.
    #[serde(default = "default_method")]
    pub method: u32,
    /// Countdown refresh interval. Clamped so the seconds field still ticks.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Whether Sunrise counts as a countdown target. Off by default —
    /// Sunrise is a reference mark, not a prayer.
    #[serde(default)]
    pub include_sunrise: bool,
    /// Honor a numeric UTC offset annotation on fetched times instead of
    /// discarding it. Only meaningful when running outside Saudi time.
    #[serde(default)]
    pub honor_utc_offset: bool,
    /// This machine's UTC offset in minutes, used with `honor_utc_offset`.
    #[serde(default = "default_local_offset")]
    pub local_offset_minutes: i32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            city: default_city(),
            method: default_method(),
            tick_ms: default_tick_ms(),
            include_sunrise: false,
            honor_utc_offset: false,
            local_offset_minutes: default_local_offset(),
        }
    }
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "salaam-clock")
            .context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Reading {:?}", path))?;
        let config: AppConfig = toml::from_str(&content).context("Parsing config.toml")?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Serializing config")?;
        std::fs::write(path, content).with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }

    /// Countdown candidates in day order, per the Sunrise setting.
    pub fn candidates(&self) -> Vec<PrayerName> {
        if self.include_sunrise {
            PrayerName::day_order().to_vec()
        } else {
            PrayerName::ritual().to_vec()
        }
    }

    pub fn offset_policy(&self) -> OffsetPolicy {
        if self.honor_utc_offset {
            OffsetPolicy::Honor {
                local_offset_minutes: self.local_offset_minutes,
            }
        } else {
            OffsetPolicy::Ignore
        }
    }

    /// 100..=1000 ms; anything slower than a second would freeze the
    /// displayed seconds field.
    pub fn effective_tick_ms(&self) -> u64 {
        self.tick_ms.clamp(100, 1000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = AppConfig::default();
        config.city = City::Medina;
        config.include_sunrise = true;
        config.tick_ms = 250;
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.city, City::Medina);
        assert!(loaded.include_sunrise);
        assert_eq!(loaded.tick_ms, 250);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "city = \"medina\"\n").unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.city, City::Medina);
        assert_eq!(loaded.method, 2);
        assert_eq!(loaded.tick_ms, 500);
        assert!(!loaded.include_sunrise);
    }

    #[test]
    fn missing_file_is_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = AppConfig::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(loaded.city, City::Makkah);
    }

    #[test]
    fn tick_is_clamped() {
        let mut config = AppConfig::default();
        config.tick_ms = 10_000;
        assert_eq!(config.effective_tick_ms(), 1000);
        config.tick_ms = 1;
        assert_eq!(config.effective_tick_ms(), 100);
    }

    #[test]
    fn candidates_follow_sunrise_setting() {
        let mut config = AppConfig::default();
        assert!(!config.candidates().contains(&PrayerName::Sunrise));
        config.include_sunrise = true;
        assert!(config.candidates().contains(&PrayerName::Sunrise));
    }
}
