// details/client.rs

use super::sanitize::{sanitize_details, SanitizedDetail};
use crate::search::fetch::{encode_uri_component, FetchError, RapidApiTransport};
use std::fmt;

pub const DETAIL_HOST: &str = "zillow-working-api.p.rapidapi.com";

#[derive(Debug)]
pub enum DetailError {
    MissingApiKey,
    Fetch(FetchError),
}

impl fmt::Display for DetailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetailError::MissingApiKey => write!(f, "Missing RAPIDAPI_KEY"),
            DetailError::Fetch(e) => write!(f, "detail lookup failed: {e}"),
        }
    }
}

impl std::error::Error for DetailError {}

pub struct DetailClient<'a> {
    transport: &'a dyn RapidApiTransport,
    api_key: Option<String>,
}

impl<'a> DetailClient<'a> {
    pub fn new(transport: &'a dyn RapidApiTransport, api_key: Option<String>) -> Self {
        Self { transport, api_key }
    }

    /// Address-keyed detail lookup. A missing credential is a per-call
    /// failure so the caller can degrade to search-only data.
    pub fn lookup(&self, address: &str) -> Result<SanitizedDetail, DetailError> {
        let api_key = self.api_key.as_deref().ok_or(DetailError::MissingApiKey)?;
        let url = format!(
            "https://{DETAIL_HOST}/pro/byaddress?propertyaddress={}",
            encode_uri_component(address)
        );
        let raw = self
            .transport
            .get_json(&url, DETAIL_HOST, api_key)
            .map_err(DetailError::Fetch)?;
        Ok(sanitize_details(&raw))
    }
}
