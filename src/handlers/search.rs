// handlers/search.rs
//
// The main pipeline endpoint: validate the brief, gather listings across
// providers, enrich and gate them, have the LLM score the survivors, and
// persist the session.

use super::read_json_body;
use crate::ai::{evaluate_properties, GeminiClient};
use crate::config::AppConfig;
use crate::db::connection::Database;
use crate::db::{clients, sessions};
use crate::details::DetailClient;
use crate::domain::requests::ClientSearchInput;
use crate::domain::types::{SearchSession, SearchSessionSummary};
use crate::errors::{ResultResp, ServerError};
use crate::fusion::fuse_listings;
use crate::ids::generate_id;
use crate::responses::json_response;
use crate::search::{build_zillow_search_url, HttpTransport, SearchClient, DEFAULT_SEARCH_LIMIT};
use crate::spreadsheets::export_evaluated_xlsx;
use astra::Request;
use chrono::Utc;
use serde_json::json;

pub fn create_search(req: Request, db: &Database, config: &AppConfig) -> ResultResp {
    let input: ClientSearchInput = read_json_body(req)?;
    input.validate().map_err(ServerError::BadRequest)?;

    let client = clients::get_or_create_by_email(db, input.client_name.trim(), input.client_email.trim())?;

    let rapidapi_key = config
        .rapidapi_key
        .clone()
        .ok_or_else(|| ServerError::Config("RAPIDAPI_KEY missing".to_string()))?;

    let transport = HttpTransport::new().map_err(|e| ServerError::Upstream(e.to_string()))?;
    let search_client = SearchClient::new(&transport, rapidapi_key.clone());

    let location = input.preferred_location.trim();
    let listings = search_client
        .search_by_location(location, DEFAULT_SEARCH_LIMIT)
        .map_err(|e| ServerError::BadRequest(e.to_string()))?;

    if listings.is_empty() {
        return Err(ServerError::BadRequest(
            "No properties returned from search API. Try broadening the location.".to_string(),
        ));
    }

    let mut session = SearchSession {
        id: generate_id(),
        client_id: client.id.clone(),
        created_at: Utc::now().to_rfc3339(),
        preferred_location: location.to_string(),
        client_notes: input.client_notes.trim().to_string(),
        zillow_search_url: build_zillow_search_url(location),
        min_price: input.min_price,
        max_price: input.max_price,
        candidate_count: 0,
        evaluated_properties: Vec::new(),
        selected_property_ids: None,
        final_email: None,
    };

    let detail_client = DetailClient::new(&transport, Some(rapidapi_key));
    let (enriched, stats) = fuse_listings(&listings, input.min_price, input.max_price, |listing| {
        let address = listing.address.as_deref()?;
        match detail_client.lookup(address) {
            Ok(detail) => Some(detail),
            Err(e) => {
                eprintln!("[search/create] detail lookup failed for {address}: {e}");
                None
            }
        }
    });

    eprintln!(
        "[search/create] listing stats: total={} passedPrice={} kept={} skippedMissingFields={}",
        stats.total_listings, stats.passed_price, stats.kept, stats.skipped_missing_fields
    );

    if enriched.is_empty() {
        return Err(ServerError::BadRequest(
            "No properties found; adjust location/filters.".to_string(),
        ));
    }

    let gemini_key = config
        .gemini_api_key
        .clone()
        .ok_or_else(|| ServerError::Config("GEMINI_API_KEY missing; cannot evaluate properties.".to_string()))?;
    let gemini = GeminiClient::new(gemini_key).map_err(|e| ServerError::Upstream(e.to_string()))?;

    let evaluated = evaluate_properties(&gemini, &input, &enriched)?;

    session.candidate_count = enriched.len();
    session.evaluated_properties = evaluated;
    sessions::save_session(db, &session)?;

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
    )?;

    json_response(&json!({
        "searchId": session.id,
        "clientId": client.id,
    }))
}

pub fn export_search_xlsx(search_id: &str, db: &Database) -> ResultResp {
    let session = sessions::get_session(db, search_id)?
        .ok_or_else(|| ServerError::NotFound("Search not found".to_string()))?;
    export_evaluated_xlsx(&session.evaluated_properties, &session.id)
}
