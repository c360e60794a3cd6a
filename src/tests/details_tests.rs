use crate::details::client::{DetailClient, DetailError};
use crate::details::sanitize::sanitize_details;
use crate::tests::utils::FakeTransport;
use serde_json::json;

#[test]
fn sanitize_is_total_over_garbage_input() {
    for raw in [json!(null), json!("nonsense"), json!([1, 2, 3]), json!({})] {
        let detail = sanitize_details(&raw);
        assert!(detail.street_address.is_none());
        assert!(detail.price.is_none());
        assert!(detail.photos.is_none());
        assert!(detail.last_sale.is_none());
        assert!(detail.nearby_schools.is_none());
    }
}

#[test]
fn coerces_numeric_strings_and_numeric_zipcodes() {
    let raw = json!({
        "address": { "streetAddress": "212 W Market St", "city": "Pottsville", "state": "PA", "zipcode": 17901 },
        "price": "249900",
        "bedrooms": "3",
        "bathrooms": 1.5,
        "livingArea": "1400",
        "yearBuilt": 1920
    });
    let detail = sanitize_details(&raw);
    assert_eq!(detail.street_address.as_deref(), Some("212 W Market St"));
    assert_eq!(detail.zipcode.as_deref(), Some("17901"));
    assert_eq!(detail.price, Some(249_900.0));
    assert_eq!(detail.bedrooms, Some(3.0));
    assert_eq!(detail.bathrooms, Some(1.5));
    assert_eq!(detail.living_area_sqft, Some(1_400.0));
    assert_eq!(detail.year_built, Some(1920.0));
}

#[test]
fn plain_string_address_aliases_back_the_street_address() {
    let detail = sanitize_details(&json!({ "address": "212 W Market St, Pottsville, PA" }));
    assert_eq!(
        detail.street_address.as_deref(),
        Some("212 W Market St, Pottsville, PA")
    );

    let detail = sanitize_details(&json!({ "propertyAddress": "5 Oak Ave" }));
    assert_eq!(detail.street_address.as_deref(), Some("5 Oak Ave"));
}

#[test]
fn unwraps_the_data_envelope() {
    let raw = json!({ "data": { "price": 180000, "stateCode": "PA" } });
    let detail = sanitize_details(&raw);
    assert_eq!(detail.price, Some(180_000.0));
    assert_eq!(detail.state.as_deref(), Some("PA"));
}

#[test]
fn last_sale_needs_a_marker_field() {
    // salePrice alone is not a marker.
    let detail = sanitize_details(&json!({ "salePrice": 90000 }));
    assert!(detail.last_sale.is_none());

    // A marker plus salePrice yields both date and price.
    let detail = sanitize_details(&json!({
        "lastSoldDate": "2019-06-01",
        "salePrice": 90000
    }));
    let sale = detail.last_sale.expect("last sale should be present");
    assert_eq!(sale.date.as_deref(), Some("2019-06-01"));
    assert_eq!(sale.price, Some(90_000.0));

    // lastSoldPrice alone is a marker even without a date.
    let detail = sanitize_details(&json!({ "lastSoldPrice": 85000 }));
    let sale = detail.last_sale.expect("last sale should be present");
    assert!(sale.date.is_none());
    assert_eq!(sale.price, Some(85_000.0));
}

#[test]
fn numeric_sale_dates_become_rfc3339() {
    let detail = sanitize_details(&json!({ "lastSoldDate": 1700000000000u64 }));
    let sale = detail.last_sale.expect("last sale should be present");
    assert_eq!(sale.date.as_deref(), Some("2023-11-14T22:13:20.000Z"));
}

#[test]
fn photo_extraction_puts_the_hero_image_first_and_dedupes() {
    let raw = json!({
        "imgSrc": "https://cdn.example.com/hero.jpg",
        "originalPhotos": [
            { "url": "https://cdn.example.com/hero.jpg?w=1024" },
            { "url": "https://cdn.example.com/kitchen.jpg" }
        ],
        "media": {
            "allPropertyPhotos": { "medium": ["https://cdn.example.com/kitchen.jpg", "https://cdn.example.com/yard.jpg"] }
        }
    });
    let photos = sanitize_details(&raw).photos.expect("photos expected");
    assert_eq!(
        photos,
        vec![
            "https://cdn.example.com/hero.jpg",
            "https://cdn.example.com/kitchen.jpg",
            "https://cdn.example.com/yard.jpg"
        ]
    );
}

#[test]
fn schools_are_sanitized_per_entry() {
    let raw = json!({
        "nearbySchools": [
            { "name": "Lincoln Elementary", "rating": 7, "grades": "K-5" },
            { "schoolName": "Central High", "greatSchoolsRating": "6" },
            "not an object"
        ]
    });
    let schools = sanitize_details(&raw).nearby_schools.expect("schools expected");
    assert_eq!(schools.len(), 2);
    assert_eq!(schools[0].name.as_deref(), Some("Lincoln Elementary"));
    assert_eq!(schools[0].rating, Some(7.0));
    assert_eq!(schools[1].name.as_deref(), Some("Central High"));
    assert_eq!(schools[1].rating, Some(6.0));
}

#[test]
fn lookup_without_credential_fails_per_call() {
    let transport = FakeTransport::new();
    let client = DetailClient::new(&transport, None);
    let err = client
        .lookup("1 Main St, Pottsville, PA 17901")
        .expect_err("lookup should fail without a key");
    assert!(matches!(err, DetailError::MissingApiKey));
    assert_eq!(err.to_string(), "Missing RAPIDAPI_KEY");
}

#[test]
fn lookup_sanitizes_the_upstream_payload() {
    let transport = FakeTransport::new();
    transport.on(
        "/pro/byaddress",
        Ok(json!({
            "data": {
                "address": { "streetAddress": "212 W Market St", "city": "Pottsville", "state": "PA", "zipcode": "17901" },
                "price": 249900,
                "zestimate": 255000
            }
        })),
    );

    let client = DetailClient::new(&transport, Some("key".into()));
    let detail = client
        .lookup("212 W Market St, Pottsville, PA 17901")
        .expect("lookup should succeed");
    assert_eq!(detail.street_address.as_deref(), Some("212 W Market St"));
    assert_eq!(detail.zestimate, Some(255_000.0));
}
