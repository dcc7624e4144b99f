use chrono::Datelike;
use clap::ValueEnum;
use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    pub fn from_month(month: u32) -> Season {
        match month {
            1..=3 => Season::Winter,
            4..=6 => Season::Spring,
            7..=9 => Season::Summer,
            _ => Season::Fall,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Season::Winter => "winter",
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Fall => "fall",
        };
        f.write_str(name)
    }
}

/// A quarterly airing season of one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cour {
    pub season: Season,
    pub year: i32,
}

impl Cour {
    pub fn new(season: Season, year: i32) -> Self {
        Self { season, year }
    }

    pub fn current() -> Self {
        let now = chrono::Local::now();
        Self::new(Season::from_month(now.month()), now.year())
    }
}

impl fmt::Display for Cour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.year, self.season)
    }
}
