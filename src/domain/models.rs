use serde::Deserialize;

use crate::domain::cour::{Cour, Season};
use crate::workflows::names::generate_names;

/// One media item and the names it may be released under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub title: String,
    pub names: Vec<String>,
}

impl Entry {
    pub fn new(title: impl Into<String>, names: Vec<String>) -> Self {
        Self {
            title: title.into(),
            names,
        }
    }

    /// Entry for a free-text search, the query is its only name.
    pub fn from_query(query: &str) -> Self {
        Self::new(query, generate_names([query]))
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AnimeDetails {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub alternative_titles: AlternativeTitles,
    pub start_season: Option<StartSeason>,
    #[serde(default)]
    pub status: AiringStatus,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AlternativeTitles {
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub en: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct StartSeason {
    pub year: i32,
    pub season: Season,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AiringStatus {
    FinishedAiring,
    CurrentlyAiring,
    NotYetAired,
    #[default]
    #[serde(other)]
    Unknown,
}

impl AnimeDetails {
    /// Started in `cour` or still airing. Entries without a start season never match.
    pub fn is_airing_in(&self, cour: Cour) -> bool {
        match self.start_season {
            None => false,
            Some(start) => {
                (start.season == cour.season && start.year == cour.year)
                    || self.status == AiringStatus::CurrentlyAiring
            }
        }
    }

    pub fn into_entry(self) -> Entry {
        let names = generate_names(
            [self.title.clone(), self.alternative_titles.en]
                .into_iter()
                .chain(self.alternative_titles.synonyms),
        );
        Entry::new(self.title, names)
    }
}
