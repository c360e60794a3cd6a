// search/photos.rs

use super::value::{non_empty_str, value_at};
use serde_json::Value;
use std::collections::HashSet;

/// Per-entry candidate chain for nested photo objects. Order matters and is
/// part of the mapping contract.
const PHOTO_ENTRY_PATHS: [&[&str]; 6] = [
    &["url"],
    &["href"],
    &["link"],
    &["originalUrl"],
    &["mixedSources", "jpeg", "0", "url"],
    &["mixedSources", "webp", "0", "url"],
];

/// Extract absolute URLs from an array of photo objects, one per entry.
/// Anything that is not an array yields nothing.
pub fn collect_photo_urls(photos: &Value) -> Vec<String> {
    let Some(items) = photos.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|entry| {
            PHOTO_ENTRY_PATHS
                .iter()
                .find_map(|path| value_at(entry, path).and_then(non_empty_str))
        })
        .filter(|url| url.starts_with("http"))
        .map(str::to_string)
        .collect()
}

/// Normalize and deduplicate a photo URL list.
///
/// Drops entries that do not start with an absolute `http` scheme prefix and
/// dedups on the query-stripped form; the first original (un-stripped) URL
/// wins. Pure and deterministic: the detail enricher and the display layer
/// both rely on agreeing on the canonical list.
pub fn dedupe_photo_urls<I>(urls: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut cleaned = Vec::new();
    for raw in urls {
        let url = raw.as_ref().trim();
        if !url.starts_with("http") {
            continue;
        }
        let normalized = url.split('?').next().unwrap_or(url).to_string();
        if seen.insert(normalized) {
            cleaned.push(url.to_string());
        }
    }
    cleaned
}
