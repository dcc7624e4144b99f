use anyhow::{bail, Context, Result};
use reqwest::blocking::{Client, RequestBuilder};
use serde::Deserialize;
use std::time::Duration;

use crate::config::Credentials;
use crate::domain::models::AnimeDetails;
use crate::infra::pool;

const MAL_API_BASE: &str = "https://api.myanimelist.net/v2";
const CLIENT_ID_HEADER: &str = "X-MAL-CLIENT-ID";
const DETAIL_FIELDS: &str = "id,title,alternative_titles,start_season,status";

/// List sections that are considered for feeds, in query order.
pub const LIST_STATUSES: [&str; 2] = ["watching", "plan_to_watch"];

#[derive(Debug, Deserialize)]
struct ListResponse {
    data: Vec<ListItem>,
    #[serde(default)]
    paging: Paging,
}

#[derive(Debug, Deserialize)]
struct ListItem {
    node: ListNode,
}

#[derive(Debug, Deserialize)]
struct ListNode {
    id: u64,
}

#[derive(Debug, Deserialize, Default)]
struct Paging {
    next: Option<String>,
}

pub struct MalClient {
    client: Client,
    credentials: Credentials,
    api_base: String,
}

impl MalClient {
    pub fn new(credentials: Credentials, timeout: Duration) -> Result<Self> {
        Self::with_api_base(credentials, timeout, MAL_API_BASE)
    }

    fn with_api_base(credentials: Credentials, timeout: Duration, api_base: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            credentials,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    fn get(&self, url: &str) -> RequestBuilder {
        self.client
            .get(url)
            .header(CLIENT_ID_HEADER, &self.credentials.client_id)
    }

    fn send(&self, request: RequestBuilder) -> Result<String> {
        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            bail!("MAL request failed: HTTP {}", status);
        }
        Ok(response.text()?)
    }

    /// Ids from the watching list followed by the plan to watch list.
    pub fn fetch_list_ids(&self) -> Result<Vec<u64>> {
        let mut ids = Vec::new();
        for status in LIST_STATUSES {
            let status_ids = self.fetch_status_ids(status)?;
            tracing::info!("Found {} entries in {} list", status_ids.len(), status);
            ids.extend(status_ids);
        }
        Ok(ids)
    }

    fn fetch_status_ids(&self, status: &str) -> Result<Vec<u64>> {
        let url = format!(
            "{}/users/{}/animelist",
            self.api_base, self.credentials.username
        );
        let first_page = self.get(&url).query(&[
            ("status", status),
            ("limit", "1000"),
            ("sort", "anime_start_date"),
        ]);

        let (mut ids, mut next) = parse_list_page(&self.send(first_page)?)?;
        while let Some(next_url) = next {
            tracing::debug!("Following list page {}", next_url);
            let (page_ids, page_next) = parse_list_page(&self.send(self.get(&next_url))?)?;
            ids.extend(page_ids);
            next = page_next;
        }

        Ok(ids)
    }

    pub fn fetch_details(&self, id: u64) -> Result<AnimeDetails> {
        let url = format!("{}/anime/{}", self.api_base, id);
        let body = self.send(self.get(&url).query(&[("fields", DETAIL_FIELDS)]))?;
        let details: AnimeDetails = serde_json::from_str(&body)
            .with_context(|| format!("Failed to parse details of entry {id}"))?;
        Ok(details)
    }

    /// Fetches details for every id on a bounded worker pool.
    ///
    /// Failed lookups are logged and skipped; the rest keep the order of `ids`.
    pub fn fetch_all_details(&self, ids: &[u64], workers: usize) -> Vec<AnimeDetails> {
        pool::map_bounded(ids, workers, |id| (*id, self.fetch_details(*id)))
            .into_iter()
            .filter_map(|(id, result)| match result {
                Ok(details) => Some(details),
                Err(e) => {
                    tracing::warn!("Skipping entry {}: {:#}", id, e);
                    None
                }
            })
            .collect()
    }
}

fn parse_list_page(body: &str) -> Result<(Vec<u64>, Option<String>)> {
    let page: ListResponse = serde_json::from_str(body).context("Failed to parse MAL list page")?;
    let ids = page.data.into_iter().map(|item| item.node.id).collect();
    Ok((ids, page.paging.next))
}
