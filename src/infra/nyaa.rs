use quick_xml::events::Event;
use quick_xml::reader::Reader;
use reqwest::blocking::Client;
use std::time::Duration;
use thiserror::Error;

use crate::workflows::resolver::FeedVerifier;

#[derive(Debug, Error)]
pub enum VerifyError {
    /// Connection, TLS or timeout failure.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Body is not well-formed feed markup.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Checks search feeds against the live indexer, one blocking GET per call.
pub struct NyaaVerifier {
    client: Client,
}

impl NyaaVerifier {
    pub fn new(timeout: Duration) -> Result<Self, VerifyError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl FeedVerifier for NyaaVerifier {
    fn has_entries(&self, url: &str) -> Result<bool, VerifyError> {
        let response = self.client.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(VerifyError::HttpStatus(status.as_u16()));
        }

        let body = response.bytes()?;
        let items = count_feed_items(&body)?;
        tracing::debug!("Feed {} has {} item(s)", url, items);
        Ok(items > 0)
    }
}

/// Counts `item` (RSS) and `entry` (Atom) elements anywhere in the document.
pub fn count_feed_items(xml: &[u8]) -> Result<usize, VerifyError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut items = 0;
    let mut depth: usize = 0;
    let mut seen_root = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                if is_item(e.local_name().as_ref()) {
                    items += 1;
                }
                depth += 1;
                seen_root = true;
            }
            Ok(Event::Empty(e)) => {
                if is_item(e.local_name().as_ref()) {
                    items += 1;
                }
                seen_root = true;
            }
            Ok(Event::End(_)) => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| VerifyError::Parse("unexpected closing tag".to_string()))?;
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(VerifyError::Parse(format!("XML parse error: {e}"))),
            _ => {}
        }
        buf.clear();
    }

    if !seen_root {
        return Err(VerifyError::Parse("document has no root element".to_string()));
    }
    if depth != 0 {
        return Err(VerifyError::Parse("document ended inside an element".to_string()));
    }

    Ok(items)
}

fn is_item(local_name: &[u8]) -> bool {
    local_name == b"item" || local_name == b"entry"
}
