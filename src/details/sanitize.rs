// details/sanitize.rs
//
// Reduce a detail payload of any shape to a fixed record. Total over
// arbitrary JSON: garbage input yields an all-absent record, never an
// error. Candidate chains encode provider field aliases in priority order.

use crate::domain::types::NearbySchool;
use crate::search::photos::{collect_photo_urls, dedupe_photo_urls};
use crate::search::value::{number_at, scalar_string_at, string_at, to_number, value_at};
use chrono::{SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizedDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zipcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_built: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<f64>,
    #[serde(rename = "livingArea_sqft", skip_serializing_if = "Option::is_none")]
    pub living_area_sqft: Option<f64>,
    #[serde(rename = "lotSize_sqft", skip_serializing_if = "Option::is_none")]
    pub lot_size_sqft: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zestimate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_tax_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_assessed_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_sale: Option<LastSale>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_square_foot: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_on_zillow: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photos: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nearby_schools: Option<Vec<NearbySchool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cooling: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parking_capacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zillow_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastSale {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

pub fn sanitize_details(raw: &Value) -> SanitizedDetail {
    // Some responses wrap the record in a `data` envelope.
    let base = match value_at(raw, &["data"]) {
        Some(inner) if inner.is_object() => inner,
        _ => raw,
    };

    SanitizedDetail {
        street_address: string_at(
            base,
            &[
                &["address", "streetAddress"],
                &["address"],
                &["streetAddress"],
                &["propertyAddress"],
            ],
        ),
        city: string_at(base, &[&["address", "city"], &["city"]]),
        state: string_at(
            base,
            &[&["address", "state"], &["state"], &["stateCode"]],
        ),
        zipcode: scalar_string_at(
            base,
            &[&["address", "zipcode"], &["zipcode"], &["zip"]],
        ),
        county: string_at(base, &[&["county"], &["address", "county"]]),
        year_built: number_at(base, &[&["yearBuilt"]]),
        bedrooms: number_at(base, &[&["bedrooms"], &["bed"]]),
        bathrooms: number_at(base, &[&["bathrooms"], &["bath"]]),
        living_area_sqft: number_at(
            base,
            &[&["livingArea"], &["livingAreaValue"], &["area"]],
        ),
        lot_size_sqft: number_at(
            base,
            &[&["lotSize"], &["lotSize_sqft"], &["lotAreaValue"]],
        ),
        zestimate: number_at(
            base,
            &[&["zestimate"], &["zEstimate"], &["priceZestimate"]],
        ),
        annual_tax_amount: number_at(base, &[&["taxAnnualAmount"], &["taxAnnual"]]),
        tax_assessed_value: number_at(base, &[&["taxAssessedValue"], &["assessedValue"]]),
        last_sale: sanitize_last_sale(base),
        price_per_square_foot: number_at(
            base,
            &[&["pricePerSqft"], &["pricePerSquareFoot"]],
        ),
        days_on_zillow: number_at(base, &[&["daysOnZillow"], &["daysOnMarket"]]),
        photos: extract_detail_photos(base),
        nearby_schools: sanitize_schools(base),
        description: string_at(base, &[&["description"], &["homeDescription"]]),
        heating: string_at(base, &[&["heating"]]),
        cooling: string_at(base, &[&["cooling"]]),
        parking_capacity: number_at(base, &[&["parkingCapacity"], &["garageSpaces"]]),
        zillow_url: string_at(base, &[&["zillowUrl"], &["zillowHomeUrl"], &["link"]]),
        price: number_at(base, &[&["price"], &["homeValue"], &["listPrice"]]),
    }
}

/// Present only if the payload carries any last-sale marker. `salePrice`
/// alone does not count as a marker but does supply the price when one of
/// the markers is present.
fn sanitize_last_sale(base: &Value) -> Option<LastSale> {
    let has_marker = value_at(base, &["lastSoldDate"]).is_some()
        || value_at(base, &["lastSaleDate"]).is_some()
        || value_at(base, &["lastSoldPrice"]).is_some();
    if !has_marker {
        return None;
    }

    let date = value_at(base, &["lastSoldDate"])
        .or_else(|| value_at(base, &["lastSaleDate"]))
        .and_then(parse_date);
    let price = value_at(base, &["lastSoldPrice"])
        .or_else(|| value_at(base, &["salePrice"]))
        .and_then(to_number);

    Some(LastSale { date, price })
}

/// Date strings pass through untouched; numeric values are treated as epoch
/// milliseconds and rendered as RFC 3339.
fn parse_date(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => {
            let millis = n.as_f64()? as i64;
            Utc.timestamp_millis_opt(millis)
                .single()
                .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        }
        _ => None,
    }
}

fn extract_detail_photos(base: &Value) -> Option<Vec<String>> {
    let mut urls: Vec<String> = Vec::new();

    // Hero image first so it survives dedup as the lead photo.
    if let Some(hero) = string_at(
        base,
        &[
            &["imgSrc"],
            &["image"],
            &["homeImage"],
            &["hiResImageLink"],
            &["mediumImageLink"],
        ],
    ) {
        urls.push(hero);
    }

    for path in [
        &["originalPhotos"][..],
        &["property", "originalPhotos"][..],
        &["propertyDetails", "originalPhotos"][..],
    ] {
        if let Some(photos) = value_at(base, path) {
            urls.extend(collect_photo_urls(photos));
        }
    }

    for path in [
        &["propertyPhotoLinks", "highResolutionLink"][..],
        &["propertyPhotoLinks", "mediumSizeLink"][..],
        &["media", "propertyPhotoLinks", "highResolutionLink"][..],
        &["media", "propertyPhotoLinks", "mediumSizeLink"][..],
    ] {
        if let Some(url) = value_at(base, path).and_then(|v| v.as_str()) {
            urls.push(url.to_string());
        }
    }

    for path in [
        &["allPropertyPhotos", "medium"][..],
        &["allPropertyPhotos", "large"][..],
        &["media", "allPropertyPhotos", "medium"][..],
        &["media", "allPropertyPhotos", "large"][..],
    ] {
        if let Some(list) = value_at(base, path).and_then(Value::as_array) {
            urls.extend(
                list.iter()
                    .filter_map(|v| v.as_str())
                    .map(str::to_string),
            );
        }
    }

    if let Some(photos) = value_at(base, &["media", "photos"]) {
        urls.extend(collect_photo_urls(photos));
    }

    let cleaned = dedupe_photo_urls(urls);
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

fn sanitize_schools(base: &Value) -> Option<Vec<NearbySchool>> {
    let schools = value_at(base, &["nearbySchools"])
        .or_else(|| value_at(base, &["schools"]))?
        .as_array()?;

    let list: Vec<NearbySchool> = schools
        .iter()
        .filter(|entry| entry.is_object())
        .map(|entry| NearbySchool {
            name: string_at(entry, &[&["name"], &["schoolName"]]),
            rating: number_at(entry, &[&["rating"], &["greatSchoolsRating"]]),
            grades: string_at(entry, &[&["grades"], &["gradeRange"]]),
        })
        .collect();

    if list.is_empty() {
        None
    } else {
        Some(list)
    }
}
