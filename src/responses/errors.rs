use crate::errors::ServerError;
use astra::{Body, Response, ResponseBuilder};
use serde_json::json;

/// Convert a ServerError into a JSON error response.
pub fn error_to_response(err: ServerError) -> Response {
    let (status, message) = match &err {
        ServerError::NotFound(msg) => (404, msg.clone()),
        ServerError::BadRequest(msg) => (400, msg.clone()),
        ServerError::Config(msg) => (500, msg.clone()),
        ServerError::Upstream(msg) => (502, msg.clone()),
        ServerError::DbError(msg) => (500, format!("Database Error: {msg}")),
        ServerError::XlsxError(msg) => (500, format!("Spreadsheet Error: {msg}")),
        ServerError::InternalError => (500, "Internal Server Error".to_string()),
    };
    json_error_response(status, &message)
}

/// Build a JSON error body in the `{"error": "..."}` shape the UI expects.
pub fn json_error_response(status: u16, message: &str) -> Response {
    let body = json!({ "error": message }).to_string();

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "application/json; charset=utf-8")
        .body(Body::from(body))
        .unwrap_or_else(|_| {
            Response::new(Body::from(
                r#"{"error":"Internal Server Error"}"#.to_string(),
            ))
        })
}
