// fusion.rs
//
// Merge a search-stage listing with its detail record into one enriched
// property, then gate on completeness and the client's price range.
// Field precedence is listing first, then detail, with zestimate as a
// price-only fallback.

use crate::details::sanitize::SanitizedDetail;
use crate::domain::types::NearbySchool;
use crate::search::listing::RawListing;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedProperty {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zillow_url: Option<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
    pub price: f64,
    pub beds: f64,
    pub baths: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sqft: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lot_size_sqft: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_on_market: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_built: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zestimate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nearby_schools: Option<Vec<NearbySchool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photos: Option<Vec<String>>,
    #[serde(rename = "rsapiRaw", skip_serializing_if = "Option::is_none")]
    pub detail: Option<SanitizedDetail>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FusionStats {
    pub total_listings: usize,
    pub passed_price: usize,
    pub kept: usize,
    pub skipped_missing_fields: usize,
}

pub enum FusionOutcome {
    Kept(Box<EnrichedProperty>),
    MissingFields,
    OutOfPriceRange,
    NoAddress,
}

/// Fuse one listing with its (possibly absent) detail record and apply the
/// completeness and price gates. Price bounds are inclusive.
pub fn fuse_listing(
    listing: &RawListing,
    detail: Option<SanitizedDetail>,
    min_price: Option<f64>,
    max_price: Option<f64>,
) -> FusionOutcome {
    let address = detail
        .as_ref()
        .and_then(full_detail_address)
        .or_else(|| listing.address.clone());
    let Some(address) = address.filter(|a| !a.trim().is_empty()) else {
        return FusionOutcome::NoAddress;
    };

    let price = listing
        .price
        .or_else(|| detail.as_ref().and_then(|d| d.price))
        .or_else(|| detail.as_ref().and_then(|d| d.zestimate));
    let beds = listing
        .bedrooms
        .or_else(|| detail.as_ref().and_then(|d| d.bedrooms));
    let baths = listing
        .bathrooms
        .or_else(|| detail.as_ref().and_then(|d| d.bathrooms));

    let (Some(price), Some(beds), Some(baths)) = (price, beds, baths) else {
        return FusionOutcome::MissingFields;
    };

    if min_price.is_some_and(|min| price < min) || max_price.is_some_and(|max| price > max) {
        return FusionOutcome::OutOfPriceRange;
    }

    let (city, state, zipcode) = locality_parts(listing, detail.as_ref(), &address);

    let photos = listing
        .photos
        .clone()
        .filter(|p| !p.is_empty())
        .or_else(|| detail.as_ref().and_then(|d| d.photos.clone()));

    let enriched = EnrichedProperty {
        zillow_url: listing
            .zillow_url
            .clone()
            .or_else(|| detail.as_ref().and_then(|d| d.zillow_url.clone())),
        address,
        city,
        state,
        zipcode,
        price,
        beds,
        baths,
        sqft: listing
            .living_area
            .or_else(|| detail.as_ref().and_then(|d| d.living_area_sqft)),
        lot_size_sqft: detail.as_ref().and_then(|d| d.lot_size_sqft),
        days_on_market: listing
            .days_on_zillow
            .or_else(|| detail.as_ref().and_then(|d| d.days_on_zillow)),
        year_built: detail.as_ref().and_then(|d| d.year_built),
        zestimate: detail.as_ref().and_then(|d| d.zestimate),
        description: detail.as_ref().and_then(|d| d.description.clone()),
        nearby_schools: detail.as_ref().and_then(|d| d.nearby_schools.clone()),
        photos,
        detail,
    };

    FusionOutcome::Kept(Box::new(enriched))
}

/// Run the whole batch through `fuse_listing`, resolving details via the
/// supplied lookup. Stats mirror what the gates did to each listing.
pub fn fuse_listings<F>(
    listings: &[RawListing],
    min_price: Option<f64>,
    max_price: Option<f64>,
    mut lookup: F,
) -> (Vec<EnrichedProperty>, FusionStats)
where
    F: FnMut(&RawListing) -> Option<SanitizedDetail>,
{
    let mut stats = FusionStats {
        total_listings: listings.len(),
        ..Default::default()
    };
    let mut kept = Vec::new();

    for listing in listings {
        let detail = lookup(listing);
        match fuse_listing(listing, detail, min_price, max_price) {
            FusionOutcome::Kept(enriched) => {
                stats.passed_price += 1;
                stats.kept += 1;
                kept.push(*enriched);
            }
            FusionOutcome::MissingFields => {
                stats.skipped_missing_fields += 1;
                eprintln!(
                    "[fusion] skipped listing missing price/beds/baths: {}",
                    listing.address.as_deref().unwrap_or("<no address>")
                );
            }
            FusionOutcome::OutOfPriceRange | FusionOutcome::NoAddress => {}
        }
    }

    (kept, stats)
}

fn full_detail_address(detail: &SanitizedDetail) -> Option<String> {
    let street = detail.street_address.as_deref()?.trim();
    if street.is_empty() {
        return None;
    }
    let mut out = street.to_string();
    if let Some(city) = detail.city.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        out.push_str(", ");
        out.push_str(city);
    }
    match (
        detail.state.as_deref().map(str::trim).filter(|s| !s.is_empty()),
        detail.zipcode.as_deref().map(str::trim).filter(|s| !s.is_empty()),
    ) {
        (Some(state), Some(zip)) => {
            out.push_str(", ");
            out.push_str(state);
            out.push(' ');
            out.push_str(zip);
        }
        (Some(state), None) => {
            out.push_str(", ");
            out.push_str(state);
        }
        (None, Some(zip)) => {
            out.push_str(", ");
            out.push_str(zip);
        }
        (None, None) => {}
    }
    Some(out)
}

/// Locality comes from explicit fields when present, else from splitting
/// the joined address on commas ("street, city, state zip").
fn locality_parts(
    listing: &RawListing,
    detail: Option<&SanitizedDetail>,
    address: &str,
) -> (String, String, String) {
    let mut city = listing
        .city
        .clone()
        .or_else(|| detail.and_then(|d| d.city.clone()));
    let mut state = listing
        .state
        .clone()
        .or_else(|| detail.and_then(|d| d.state.clone()));
    let mut zipcode = listing
        .zipcode
        .clone()
        .or_else(|| detail.and_then(|d| d.zipcode.clone()));

    if city.is_none() || state.is_none() || zipcode.is_none() {
        let parts: Vec<&str> = address.split(',').map(str::trim).collect();
        if city.is_none() {
            city = parts.get(1).map(|s| s.to_string());
        }
        if let Some(tail) = parts.get(2) {
            let mut words = tail.split_whitespace();
            if state.is_none() {
                state = words.next().map(str::to_string);
            }
            if zipcode.is_none() {
                zipcode = words.next().map(str::to_string);
            }
        }
    }

    (
        city.unwrap_or_default(),
        state.unwrap_or_default(),
        zipcode.unwrap_or_default(),
    )
}
