// search/aggregator.rs
//
// Sequential provider failover with paging. Providers are tried in priority
// order; a provider's failure keeps whatever pages it already returned, and
// a one-listing-plus-error provider is considered noise and discarded.

use super::fetch::{FetchError, RapidApiTransport};
use super::listing::RawListing;
use super::providers::{Provider, PROVIDERS};
use std::collections::HashSet;
use std::fmt;

/// Hard page cap per provider, independent of how many listings upstream
/// claims to have.
const MAX_PAGES: u32 = 8;

pub const DEFAULT_SEARCH_LIMIT: usize = 80;

#[derive(Debug)]
pub struct ProviderFailure {
    pub provider: &'static str,
    pub message: String,
}

#[derive(Debug)]
pub enum SearchError {
    AllProvidersFailed(Vec<ProviderFailure>),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::AllProvidersFailed(failures) => {
                let attempts = if failures.is_empty() {
                    "none".to_string()
                } else {
                    failures
                        .iter()
                        .map(|fail| format!("{}: {}", fail.provider, fail.message))
                        .collect::<Vec<_>>()
                        .join("; ")
                };
                write!(
                    f,
                    "All search providers failed or returned no results. Attempts: {attempts}"
                )
            }
        }
    }
}

impl std::error::Error for SearchError {}

pub struct SearchClient<'a> {
    transport: &'a dyn RapidApiTransport,
    api_key: String,
}

impl<'a> SearchClient<'a> {
    pub fn new(transport: &'a dyn RapidApiTransport, api_key: String) -> Self {
        Self { transport, api_key }
    }

    /// Query providers in priority order until `limit` deduplicated listings
    /// accumulate or the provider list is exhausted. Partial results from a
    /// failing provider are kept, except the single-listing noise case.
    pub fn search_by_location(
        &self,
        location: &str,
        limit: usize,
    ) -> Result<Vec<RawListing>, SearchError> {
        let mut results: Vec<RawListing> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut failures: Vec<ProviderFailure> = Vec::new();

        for provider in PROVIDERS.iter() {
            if results.len() >= limit {
                break;
            }

            let (listings, error) = self.run_provider_pages(provider, location, limit);

            if let Some(err) = &error {
                eprintln!("[search] provider {} failed: {err}", provider.name);
            }

            // A lone listing next to an error is more likely a mangled error
            // payload than a real result, so it goes down with the error.
            if !listings.is_empty() && (listings.len() > 1 || error.is_none()) {
                merge_listings(&mut results, &mut seen, listings, limit);
                continue;
            }

            failures.push(ProviderFailure {
                provider: provider.name,
                message: match error {
                    Some(err) => err.to_string(),
                    None => "no results returned".to_string(),
                },
            });
        }

        if results.is_empty() {
            return Err(SearchError::AllProvidersFailed(failures));
        }

        results.truncate(limit);
        Ok(results)
    }

    /// Page through one provider. Stops at `limit`, `MAX_PAGES`, an empty
    /// page, or the first fetch error; the error is returned alongside any
    /// pages already gathered.
    fn run_provider_pages(
        &self,
        provider: &Provider,
        location: &str,
        limit: usize,
    ) -> (Vec<RawListing>, Option<FetchError>) {
        let mut listings: Vec<RawListing> = Vec::new();
        let mut page: u32 = 1;

        while listings.len() < limit && page <= MAX_PAGES {
            let url = (provider.build_url)(location, page);
            let raw = match self.transport.get_json(&url, provider.host, &self.api_key) {
                Ok(raw) => raw,
                Err(err) => return (listings, Some(err)),
            };

            let page_had_results = raw
                .get("searchResults")
                .and_then(|v| v.as_array())
                .map(|items| !items.is_empty())
                .unwrap_or(false);

            let mapped = (provider.map_results)(&raw);
            let mapped_count = mapped.len();
            listings.extend(mapped);

            if !page_had_results || mapped_count == 0 {
                break;
            }
            page += 1;
        }

        (listings, None)
    }
}

fn merge_listings(
    results: &mut Vec<RawListing>,
    seen: &mut HashSet<String>,
    incoming: Vec<RawListing>,
    limit: usize,
) {
    for listing in incoming {
        if results.len() >= limit {
            break;
        }
        if seen.insert(listing.dedup_key()) {
            results.push(listing);
        }
    }
}
