// errors.rs
use astra::Response;
use std::fmt;

/// Errors originating from the server logic (routing, validation, missing
/// resources) or downstream layers (DB, outbound services).
#[derive(Debug)]
pub enum ServerError {
    NotFound(String),
    BadRequest(String),
    /// Missing credential or other operator misconfiguration.
    Config(String),
    /// An outbound service (provider, LLM, mail) failed or broke contract.
    Upstream(String),
    DbError(String),
    XlsxError(String),
    InternalError,
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::NotFound(msg) => write!(f, "{msg}"),
            ServerError::BadRequest(msg) => write!(f, "{msg}"),
            ServerError::Config(msg) => write!(f, "{msg}"),
            ServerError::Upstream(msg) => write!(f, "{msg}"),
            ServerError::DbError(msg) => write!(f, "Database Error: {msg}"),
            ServerError::XlsxError(msg) => write!(f, "Spreadsheet Error: {msg}"),
            ServerError::InternalError => write!(f, "Internal Server Error"),
        }
    }
}

impl std::error::Error for ServerError {}
