// Provider search pipeline: raw provider payloads in, deduplicated
// `RawListing`s out.

pub mod aggregator;
pub mod fetch;
pub mod listing;
pub mod photos;
pub mod providers;
pub mod value;

pub use aggregator::{SearchClient, SearchError, DEFAULT_SEARCH_LIMIT};
pub use fetch::{encode_uri_component, FetchError, HttpTransport, RapidApiTransport};
pub use listing::RawListing;
pub use photos::dedupe_photo_urls;

/// Canonical Zillow search URL recorded on every session for reference.
pub fn build_zillow_search_url(preferred_location: &str) -> String {
    format!(
        "https://www.zillow.com/homes/{}_rb/",
        encode_uri_component(preferred_location.trim())
    )
}
