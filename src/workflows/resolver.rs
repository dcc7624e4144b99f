use crate::domain::models::Entry;
use crate::infra::nyaa::VerifyError;
use crate::workflows::modifications::{NameModification, MODIFICATIONS};
use crate::workflows::query::{build_feed_url, SUBBERS};

/// Decides whether a feed search URL yields at least one result.
pub trait FeedVerifier {
    fn has_entries(&self, url: &str) -> Result<bool, VerifyError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found {
        url: String,
        name: String,
        subber: &'static str,
        /// Rule that produced `name`, `None` for an unmodified name.
        modification: Option<NameModification>,
    },
    NotFound {
        /// Unmodified names followed by every derived name, first attempt order.
        tried: Vec<String>,
    },
}

impl Resolution {
    pub fn url(&self) -> Option<&str> {
        match self {
            Resolution::Found { url, .. } => Some(url),
            Resolution::NotFound { .. } => None,
        }
    }

    /// Description of the rule behind a found name, `None` when the name was
    /// used unmodified or nothing was found.
    pub fn modification_description(&self) -> Option<&'static str> {
        match self {
            Resolution::Found { modification, .. } => modification.map(|m| m.description()),
            Resolution::NotFound { .. } => None,
        }
    }
}

/// Walks subbers × name tiers and stops at the first feed with entries.
pub struct FeedResolver<V> {
    verifier: V,
}

impl<V: FeedVerifier> FeedResolver<V> {
    pub fn new(verifier: V) -> Self {
        Self { verifier }
    }

    /// Resolves every entry independently, keeping input order.
    pub fn resolve_all(&self, entries: &[Entry], requires_entries: bool) -> Vec<Resolution> {
        entries
            .iter()
            .map(|entry| {
                tracing::info!("Resolving feed for {}", entry.title);
                self.resolve(&entry.names, requires_entries)
            })
            .collect()
    }

    pub fn resolve(&self, names: &[String], requires_entries: bool) -> Resolution {
        let mut tried: Vec<String> = Vec::new();

        for subber in SUBBERS {
            // All unmodified names go first for a subber
            for name in names {
                if let Some(found) = self.try_candidate(name, subber, None, requires_entries, &mut tried) {
                    return found;
                }
            }

            for modification in MODIFICATIONS {
                for name in modification.apply_all(names) {
                    if let Some(found) =
                        self.try_candidate(&name, subber, Some(modification), requires_entries, &mut tried)
                    {
                        return found;
                    }
                }
            }
        }

        tracing::warn!("No feed entries found for any of: {}", tried.join(" | "));
        Resolution::NotFound { tried }
    }

    fn try_candidate(
        &self,
        name: &str,
        subber: &'static str,
        modification: Option<NameModification>,
        requires_entries: bool,
        tried: &mut Vec<String>,
    ) -> Option<Resolution> {
        if !tried.iter().any(|t| t == name) {
            tried.push(name.to_string());
        }

        let url = build_feed_url(name, subber);

        if requires_entries && !self.check(&url) {
            return None;
        }

        let found = Resolution::Found {
            url,
            name: name.to_string(),
            subber,
            modification,
        };

        if requires_entries {
            // Unmodified names leave the modification field out
            tracing::info!(
                name,
                subber,
                modification = found.modification_description(),
                "Found feed entries"
            );
        } else {
            tracing::info!(name, subber, "Added feed URL with default subber");
        }

        Some(found)
    }

    fn check(&self, url: &str) -> bool {
        match self.verifier.has_entries(url) {
            Ok(has_entries) => has_entries,
            Err(e) => {
                tracing::debug!("Verification of {} failed: {}", url, e);
                false
            }
        }
    }
}

/// URLs of resolved entries, unresolved ones left out.
pub fn found_urls(resolutions: &[Resolution]) -> Vec<&str> {
    resolutions.iter().filter_map(Resolution::url).collect()
}
