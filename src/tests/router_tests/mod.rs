pub mod clients_tests;
pub mod search_tests;
pub mod session_tests;

use crate::db::connection::Database;
use crate::db::{clients, sessions};
use crate::domain::types::{
    Client, EvaluatedProperty, SearchSession, SearchSessionSummary,
};
use crate::ids::generate_id;
use chrono::Utc;

pub fn seed_client(db: &Database) -> Client {
    let client = Client {
        id: generate_id(),
        name: "Jane Buyer".into(),
        email: "jane@example.com".into(),
        notes: None,
        created_at: Utc::now().to_rfc3339(),
        searches: Vec::new(),
    };
    clients::save_client(db, &client).expect("seed client");
    client
}

pub fn seed_property(id: &str) -> EvaluatedProperty {
    EvaluatedProperty {
        id: id.to_string(),
        zillow_url: Some("https://www.zillow.com/homedetails/1_zpid/".into()),
        address: "1 Main St, Pottsville, PA 17901".into(),
        city: "Pottsville".into(),
        state: "PA".into(),
        zipcode: "17901".into(),
        photos: None,
        price: 150_000.0,
        beds: 3.0,
        baths: 2.0,
        sqft: Some(1400.0),
        lot_size_sqft: None,
        days_on_market: Some(12.0),
        year_built: Some(1920.0),
        zestimate: None,
        description: None,
        nearby_schools: None,
        ai_score: 80.0,
        ai_pros: vec!["close to schools".into()],
        ai_cons: vec!["small lot".into()],
        ai_rationale: "Fits the stated budget.".into(),
        detail: None,
    }
}

pub fn seed_session(db: &Database, client: &Client) -> SearchSession {
    let session = SearchSession {
        id: generate_id(),
        client_id: client.id.clone(),
        created_at: Utc::now().to_rfc3339(),
        preferred_location: "Pottsville, PA".into(),
        client_notes: "3 beds, quiet street".into(),
        zillow_search_url: "https://www.zillow.com/homes/Pottsville%2C%20PA_rb/".into(),
        min_price: Some(100_000.0),
        max_price: Some(300_000.0),
        candidate_count: 1,
        evaluated_properties: vec![seed_property("prop-1")],
        selected_property_ids: None,
        final_email: None,
    };
    sessions::save_session(db, &session).expect("seed session");
    clients::append_search_summary(
        db,
        &client.id,
        SearchSessionSummary {
            id: session.id.clone(),
            created_at: session.created_at.clone(),
            preferred_location: session.preferred_location.clone(),
            has_email_sent: false,
            min_price: session.min_price,
            max_price: session.max_price,
        },
    )
    .expect("seed summary");
    session
}
