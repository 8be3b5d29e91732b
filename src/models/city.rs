use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The two supported cities. Country is fixed to Saudi Arabia upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum City {
    Makkah,
    Medina,
}

impl City {
    pub fn all() -> [City; 2] {
        [City::Makkah, City::Medina]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            City::Makkah => "makkah",
            City::Medina => "medina",
        }
    }

    /// City name as sent in the Aladhan `city` query parameter.
    pub fn query_name(&self) -> &'static str {
        match self {
            City::Makkah => "Makkah",
            City::Medina => "Medina",
        }
    }

    pub fn display_name(&self) -> &'static str {
        self.query_name()
    }

    /// The other city — Tab in the TUI cycles between the two.
    pub fn toggled(&self) -> City {
        match self {
            City::Makkah => City::Medina,
            City::Medina => City::Makkah,
        }
    }
}

impl std::fmt::Display for City {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for City {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "makkah" | "mecca" => Ok(City::Makkah),
            "medina" | "madinah" => Ok(City::Medina),
            _ => Err(anyhow::anyhow!(
                "Unknown city: {} (expected makkah or medina)",
                s
            )),
        }
    }
}
