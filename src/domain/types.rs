// src/domain/types.rs
//
// Stored records. Field names are serialized in camelCase so the payloads in
// SQLite match the JSON the API serves.

use crate::details::SanitizedDetail;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: String,
    pub searches: Vec<SearchSessionSummary>,
}

/// Compact per-search entry kept on the client record, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSessionSummary {
    pub id: String,
    pub created_at: String,
    pub preferred_location: String,
    pub has_email_sent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSession {
    pub id: String,
    pub client_id: String,
    pub created_at: String,
    pub preferred_location: String,
    pub client_notes: String,
    pub zillow_search_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    pub candidate_count: usize,
    pub evaluated_properties: Vec<EvaluatedProperty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_property_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_email: Option<FinalEmailRecord>,
}

/// An enriched property after LLM scoring. `id` is generated here; the
/// pipeline record it wraps carries no identity of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatedProperty {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zillow_url: Option<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photos: Option<Vec<String>>,
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
    pub ai_score: f64,
    pub ai_pros: Vec<String>,
    pub ai_cons: Vec<String>,
    pub ai_rationale: String,
    /// Sanitized detail payload kept for audit.
    #[serde(rename = "rsapiRaw", skip_serializing_if = "Option::is_none")]
    pub detail: Option<SanitizedDetail>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbySchool {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grades: Option<String>,
}

/// The drafted (and possibly sent) client email attached to a session.
/// `sent_at` is empty until the email actually goes out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalEmailRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc: Option<Vec<String>>,
    pub subject: String,
    pub body: String,
    pub included_property_ids: Vec<String>,
    pub sent_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
}
