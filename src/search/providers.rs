// search/providers.rs
//
// The four upstream search providers, in priority order. Each provider is a
// URL builder plus a payload mapper; the aggregator drives paging and
// failover without knowing any provider's shape.

use super::fetch::encode_uri_component;
use super::listing::RawListing;
use super::photos::collect_photo_urls;
use super::value::{non_empty_str, number_at, scalar_string_at, string_at, value_at};
use serde_json::Value;

pub struct Provider {
    pub name: &'static str,
    pub host: &'static str,
    pub build_url: fn(&str, u32) -> String,
    pub map_results: fn(&Value) -> Vec<RawListing>,
}

/// Priority order is the failover order.
pub static PROVIDERS: [Provider; 4] = [
    Provider {
        name: "zllw-working-api (byaiprompt)",
        host: "zllw-working-api.p.rapidapi.com",
        build_url: build_ai_prompt_url,
        map_results: map_nested_results,
    },
    Provider {
        name: "zllw-working-api (byaddress)",
        host: "zllw-working-api.p.rapidapi.com",
        build_url: build_by_address_url,
        map_results: map_nested_results,
    },
    Provider {
        name: "zillow-working-api",
        host: "zillow-working-api.p.rapidapi.com",
        build_url: build_location_search_url,
        map_results: map_working_api_results,
    },
    Provider {
        name: "zillow56",
        host: "zillow56.p.rapidapi.com",
        build_url: build_zillow56_url,
        map_results: map_zillow56_results,
    },
];

fn build_ai_prompt_url(location: &str, page: u32) -> String {
    format!(
        "https://zllw-working-api.p.rapidapi.com/search/byaiprompt?ai_search_prompt=homes%20for%20sale%20in%20{}&page={}&sortOrder=Homes_for_you",
        encode_uri_component(location),
        page
    )
}

fn build_by_address_url(location: &str, page: u32) -> String {
    format!(
        "https://zllw-working-api.p.rapidapi.com/search/byaddress?address={}&page={}&status=for_sale",
        encode_uri_component(location),
        page
    )
}

fn build_location_search_url(location: &str, _page: u32) -> String {
    format!(
        "https://zillow-working-api.p.rapidapi.com/search?location={}&status=for_sale",
        encode_uri_component(location)
    )
}

fn build_zillow56_url(location: &str, _page: u32) -> String {
    format!(
        "https://zillow56.p.rapidapi.com/search?location={}",
        encode_uri_component(location)
    )
}

/// Items arrive either bare or wrapped in a `property` envelope.
fn unwrap_item(item: &Value) -> &Value {
    match value_at(item, &["property"]) {
        Some(inner) if inner.is_object() => inner,
        _ => item,
    }
}

fn result_items(raw: &Value) -> Vec<&Value> {
    let collection = value_at(raw, &["searchResults"])
        .or_else(|| value_at(raw, &["results"]))
        .or_else(|| value_at(raw, &["data"]));
    let Some(items) = collection.and_then(Value::as_array) else {
        return Vec::new();
    };
    items.iter().filter(|item| !item.is_null()).collect()
}

fn join_address(street: Option<String>, locality: Option<String>, zip: Option<String>) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(s) = street {
        parts.push(s);
    }
    if let Some(l) = locality {
        parts.push(l);
    }
    if let Some(z) = zip {
        parts.push(z);
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

fn zpid_url(item: &Value) -> Option<String> {
    let zpid = match value_at(item, &["zpid"]) {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        _ => return None,
    };
    Some(format!("https://www.zillow.com/homedetails/{zpid}_zpid/"))
}

fn nested_zillow_url(item: &Value) -> Option<String> {
    if let Some(path) = string_at(item, &[&["hdpView", "hdpUrl"]]) {
        if path.starts_with("http") {
            return Some(path);
        }
        return Some(format!("https://www.zillow.com{path}"));
    }
    zpid_url(item).or_else(|| string_at(item, &[&["detailUrl"], &["zillowUrl"]]))
}

/// Every photo list this provider family has been seen to use, concatenated
/// in a fixed order: the two single links, both `allPropertyPhotos` arrays,
/// then the structured `photos`/`images` entries.
fn collect_media_photos(item: &Value) -> Vec<String> {
    let Some(media) = value_at(item, &["media"]) else {
        return Vec::new();
    };

    let mut urls: Vec<String> = [
        &["propertyPhotoLinks", "highResolutionLink"][..],
        &["propertyPhotoLinks", "mediumSizeLink"][..],
    ]
    .iter()
    .filter_map(|path| value_at(media, path).and_then(non_empty_str))
    .map(str::to_string)
    .collect();

    for path in [
        &["allPropertyPhotos", "medium"][..],
        &["allPropertyPhotos", "large"][..],
    ] {
        if let Some(list) = value_at(media, path).and_then(Value::as_array) {
            urls.extend(list.iter().filter_map(non_empty_str).map(str::to_string));
        }
    }

    if let Some(entries) = value_at(media, &["photos"]).or_else(|| value_at(media, &["images"])) {
        urls.extend(collect_photo_urls(entries));
    }

    urls.retain(|url| url.starts_with("http"));
    urls
}

fn map_nested_item(item: &Value) -> RawListing {
    let item = unwrap_item(item);

    let hdp_photos = value_at(item, &["hdpView", "photos"])
        .map(collect_photo_urls)
        .unwrap_or_default();
    let rich_photos = value_at(item, &["richMedia", "photos"])
        .map(collect_photo_urls)
        .unwrap_or_default();

    let mut photos = collect_media_photos(item);
    photos.extend(hdp_photos);
    photos.extend(rich_photos);

    let street = string_at(
        item,
        &[
            &["address", "streetAddress"],
            &["streetAddress"],
            &["address"],
        ],
    );
    let city = string_at(item, &[&["address", "city"], &["city"]]);
    let state = string_at(item, &[&["address", "state"], &["state"]]);
    let zipcode = scalar_string_at(item, &[&["address", "zipcode"], &["zipcode"], &["zip"]]);

    let locality = match (&city, &state) {
        (Some(c), Some(s)) => Some(format!("{c}, {s}")),
        (Some(c), None) => Some(c.clone()),
        (None, Some(s)) => Some(s.clone()),
        (None, None) => None,
    };

    let image_url = string_at(
        item,
        &[
            &["imgSrc"],
            &["image"],
            &["homeImage"],
            &["miniCardPhotos", "0", "url"],
            &["primaryPhoto", "url"],
            &["photos", "0", "url"],
            &["hdpView", "image", "uri"],
            &["hdpView", "image", "url"],
            &["hdpView", "mainImageUrl"],
            &["hdpView", "photoUrl"],
        ],
    )
    .or_else(|| photos.first().cloned());

    RawListing {
        zillow_url: nested_zillow_url(item),
        address: join_address(street, locality, zipcode.clone()),
        price: number_at(item, &[&["price", "value"], &["price"]]),
        bedrooms: number_at(item, &[&["bedrooms"], &["beds"]]),
        bathrooms: number_at(item, &[&["bathrooms"], &["baths"]]),
        living_area: number_at(
            item,
            &[&["livingArea"], &["livingAreaValue"], &["sqft"]],
        ),
        days_on_zillow: number_at(item, &[&["daysOnZillow"], &["daysOnMarket"]]),
        city,
        state,
        zipcode,
        image_url,
        photos: if photos.is_empty() { None } else { Some(photos) },
    }
}

fn map_nested_results(raw: &Value) -> Vec<RawListing> {
    result_items(raw).into_iter().map(map_nested_item).collect()
}

/// Field candidate lists for the flat-shaped providers, which differ only in
/// which aliases they use.
struct FlatFields {
    url: &'static [&'static [&'static str]],
    address: &'static [&'static [&'static str]],
    bedrooms: &'static [&'static [&'static str]],
    bathrooms: &'static [&'static [&'static str]],
    living_area: &'static [&'static [&'static str]],
}

fn map_flat_results(raw: &Value, fields: &FlatFields) -> Vec<RawListing> {
    result_items(raw)
        .into_iter()
        .map(|item| {
            let item = unwrap_item(item);
            let photos = collect_media_photos(item);

            let street = string_at(item, fields.address);
            let city = string_at(item, &[&["city"]]);
            let state = string_at(item, &[&["state"]]);
            let zipcode = scalar_string_at(item, &[&["zipcode"], &["zip"]]);
            let locality = match (&city, &state) {
                (Some(c), Some(s)) => Some(format!("{c}, {s}")),
                (Some(c), None) => Some(c.clone()),
                (None, Some(s)) => Some(s.clone()),
                (None, None) => None,
            };

            // Street fields on these providers sometimes already carry the
            // full "street, city, state zip" form; avoid doubling it up.
            let address = match &street {
                Some(s) if s.contains(',') => Some(s.clone()),
                _ => join_address(street, locality, zipcode.clone()),
            };

            RawListing {
                zillow_url: string_at(item, fields.url).or_else(|| zpid_url(item)),
                address,
                price: number_at(item, &[&["price", "value"], &["price"]]),
                bedrooms: number_at(item, fields.bedrooms),
                bathrooms: number_at(item, fields.bathrooms),
                living_area: number_at(item, fields.living_area),
                days_on_zillow: number_at(item, &[&["daysOnZillow"], &["daysOnMarket"]]),
                city,
                state,
                zipcode,
                image_url: string_at(
                    item,
                    &[
                        &["imgSrc"],
                        &["image"],
                        &["homeImage"],
                        &["miniCardPhotos", "0", "url"],
                        &["primaryPhoto", "url"],
                        &["photos", "0", "url"],
                    ],
                )
                .or_else(|| photos.first().cloned()),
                photos: if photos.is_empty() { None } else { Some(photos) },
            }
        })
        .collect()
}

fn map_working_api_results(raw: &Value) -> Vec<RawListing> {
    map_flat_results(
        raw,
        &FlatFields {
            url: &[&["detailUrl"], &["zillowUrl"]],
            address: &[&["address"]],
            bedrooms: &[&["bedrooms"], &["beds"]],
            bathrooms: &[&["bathrooms"], &["baths"]],
            living_area: &[&["livingArea"], &["livingAreaValue"], &["sqft"]],
        },
    )
}

fn map_zillow56_results(raw: &Value) -> Vec<RawListing> {
    map_flat_results(
        raw,
        &FlatFields {
            url: &[&["detailUrl"], &["url"]],
            address: &[&["address"], &["streetAddress"]],
            bedrooms: &[&["bedrooms"], &["beds"]],
            bathrooms: &[&["bathrooms"], &["baths"]],
            living_area: &[&["livingArea"], &["livingAreaValue"], &["sqft"]],
        },
    )
}
