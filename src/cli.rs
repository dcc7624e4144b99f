use clap::Parser;

use crate::domain::cour::{Cour, Season};

#[derive(Parser, Debug)]
#[command(name = "mal-rss-link")]
#[command(about = "Creates a list of RSS feed URLs from the entries of a MyAnimeList user")]
pub struct Cli {
    /// Don't check feeds for entries, use the default subber for every entry
    #[arg(short = 'i', long)]
    pub ignore_feed: bool,

    /// Season of the cour to filter by, defaults to the current cour
    #[arg(short = 's', long, requires = "year")]
    pub season: Option<Season>,

    /// Year of the cour to filter by, defaults to the current cour
    #[arg(
        short = 'y',
        long,
        requires = "season",
        value_parser = clap::value_parser!(i32).range(1970..=2050)
    )]
    pub year: Option<i32>,

    /// Resolve a single MAL entry by id instead of the user lists
    #[arg(long, conflicts_with_all = ["query", "season", "year"])]
    pub id: Option<u64>,

    /// Resolve a free-text search query without querying MAL
    #[arg(short = 'q', long, conflicts_with_all = ["season", "year"])]
    pub query: Option<String>,

    /// Don't copy the URL list to the clipboard
    #[arg(long)]
    pub no_copy: bool,
}

impl Cli {
    /// Cour given on the command line, if any.
    pub fn cour(&self) -> Option<Cour> {
        match (self.season, self.year) {
            (Some(season), Some(year)) => Some(Cour::new(season, year)),
            _ => None,
        }
    }
}
