// search/fetch.rs

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::Value;
use std::fmt;
use std::time::Duration;

/// Per-call timeout: the sequential multi-provider, multi-page fan-out must
/// stay bounded even when an upstream hangs.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// `encodeURIComponent`-equivalent set: everything except the characters
/// JavaScript leaves bare.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_uri_component(raw: &str) -> String {
    utf8_percent_encode(raw, URI_COMPONENT).to_string()
}

#[derive(Debug)]
pub enum FetchError {
    Network(String),
    Http { status: u16, body: String },
    Parse(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(msg) => write!(f, "network error: {msg}"),
            FetchError::Http { status, body } => write!(f, "http {status}: {body}"),
            FetchError::Parse(msg) => write!(f, "json parse error: {msg}"),
        }
    }
}

impl std::error::Error for FetchError {}

/// Transport seam for RapidAPI-hosted providers. The aggregator and the
/// detail enricher go through this trait so tests can substitute canned
/// responses for live HTTP.
pub trait RapidApiTransport {
    fn get_json(&self, url: &str, host: &str, api_key: &str) -> Result<Value, FetchError>;
}

pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self { client })
    }
}

impl RapidApiTransport for HttpTransport {
    fn get_json(&self, url: &str, host: &str, api_key: &str) -> Result<Value, FetchError> {
        let resp = self
            .client
            .get(url)
            .header("x-rapidapi-key", api_key)
            .header("x-rapidapi-host", host)
            .send()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| FetchError::Parse(e.to_string()))
    }
}
