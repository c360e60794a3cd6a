// search/listing.rs

use serde::{Deserialize, Serialize};

/// A search-result-stage property record, normalized from one provider's
/// raw payload. Every numeric field is finite-or-absent; nothing is ever
/// zero-filled. `address` is the only field used as a join/dedup key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawListing {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zillow_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub living_area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_on_zillow: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zipcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photos: Option<Vec<String>>,
}

impl RawListing {
    /// Cross-provider dedup key: lowercased address, else listing URL, else
    /// the serialized record as a last resort.
    pub fn dedup_key(&self) -> String {
        self.address
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.zillow_url.as_deref().filter(|s| !s.is_empty()))
            .map(str::to_string)
            .unwrap_or_else(|| serde_json::to_string(self).unwrap_or_default())
            .to_lowercase()
    }
}
