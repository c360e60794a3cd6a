// Route handlers. Each takes the already-matched path parameters plus the
// shared database and config, and returns a JSON or XLSX response.

pub mod clients;
pub mod search;
pub mod sessions;

use crate::errors::ServerError;
use astra::Request;
use serde::de::DeserializeOwned;

/// Deserialize a JSON request body, reporting malformed payloads as 400s.
pub fn read_json_body<T: DeserializeOwned>(req: Request) -> Result<T, ServerError> {
    serde_json::from_reader(req.into_body().reader())
        .map_err(|e| ServerError::BadRequest(format!("Invalid payload: {e}")))
}
