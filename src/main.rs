mod cli;
mod config;
mod domain;
mod infra;
mod workflows;

use anyhow::{bail, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::Config;
use domain::cour::Cour;
use domain::models::Entry;
use infra::clipboard;
use infra::mal::MalClient;
use infra::nyaa::NyaaVerifier;
use workflows::resolver::{found_urls, FeedResolver};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.query.is_none())?;

    let entries = collect_entries(&cli, &config)?;
    if entries.is_empty() {
        tracing::warn!("No entries to resolve");
        return Ok(());
    }

    let resolver = FeedResolver::new(NyaaVerifier::new(config.request_timeout())?);
    let resolutions = resolver.resolve_all(&entries, !cli.ignore_feed);

    let urls = found_urls(&resolutions);
    tracing::info!("Resolved {} of {} entries", urls.len(), entries.len());

    let combined_urls = urls.join("\n");
    println!("{combined_urls}");

    if !cli.no_copy && !urls.is_empty() {
        match clipboard::copy(&combined_urls) {
            Ok(()) => tracing::info!("URL list has been copied to the clipboard"),
            Err(e) => tracing::warn!("{e:#}"),
        }
    }

    Ok(())
}

fn collect_entries(cli: &Cli, config: &Config) -> Result<Vec<Entry>> {
    if let Some(query) = &cli.query {
        if query.trim().is_empty() {
            bail!("Search query (--query) must not be empty");
        }
        return Ok(vec![Entry::from_query(query)]);
    }

    let client = MalClient::new(config.credentials()?, config.request_timeout())?;

    if let Some(id) = cli.id {
        let details = client.fetch_details(id)?;
        return Ok(vec![details.into_entry()]);
    }

    let cour = match cli.cour() {
        Some(cour) => {
            tracing::info!("Using passed cour {}", cour);
            cour
        }
        None => {
            let cour = Cour::current();
            tracing::info!("Calculated current cour to {}", cour);
            cour
        }
    };

    let ids = client.fetch_list_ids()?;

    tracing::info!("Querying detailed info for {} entries...", ids.len());
    let details = client.fetch_all_details(&ids, config.detail_workers());

    let entries: Vec<Entry> = details
        .into_iter()
        .filter(|anime| anime.is_airing_in(cour))
        .map(|anime| anime.into_entry())
        .collect();

    tracing::info!("Filtered to {} entries airing in {}", entries.len(), cour);
    for entry in &entries {
        tracing::info!("  {}", entry.title);
    }

    Ok(entries)
}
