use crate::config::AppConfig;
use crate::db::connection::{init_db, Database};
use crate::ids::generate_id;
use crate::search::fetch::{FetchError, RapidApiTransport};
use serde_json::Value;
use std::cell::RefCell;

/// Initialize a fresh test DB using the production schema. Each test gets
/// its own file so parallel tests never share state.
pub fn init_test_db() -> Database {
    let path = std::env::temp_dir().join(format!("propertybot_test_{}.sqlite3", generate_id()));
    let db = Database::new(path.to_string_lossy().to_string());

    init_db(&db, "sql/schema.sql")
        .unwrap_or_else(|e| panic!("Database initialization failed: {e}"));

    db
}

/// Config with no credentials: handlers that need them must fail cleanly.
pub fn test_config() -> AppConfig {
    AppConfig {
        bind_addr: "127.0.0.1:0".into(),
        db_path: "unused".into(),
        schema_path: "sql/schema.sql".into(),
        rapidapi_key: None,
        gemini_api_key: None,
        brevo_api_key: None,
        sender_email: None,
        sender_name: "Property Updates".into(),
        agent_signature: "Best regards,\nYour Buyer's Agent".into(),
    }
}

/// Canned-response transport. Responses are keyed by a URL substring and
/// consumed in order; an unmatched request fails as a network error.
pub struct FakeTransport {
    responses: RefCell<Vec<(&'static str, Vec<Result<Value, FetchError>>)>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self {
            responses: RefCell::new(Vec::new()),
        }
    }

    pub fn on(&self, url_part: &'static str, response: Result<Value, FetchError>) {
        let mut responses = self.responses.borrow_mut();
        if let Some(entry) = responses.iter_mut().find(|(part, _)| *part == url_part) {
            entry.1.push(response);
        } else {
            responses.push((url_part, vec![response]));
        }
    }
}

impl RapidApiTransport for FakeTransport {
    fn get_json(&self, url: &str, _host: &str, _api_key: &str) -> Result<Value, FetchError> {
        let mut responses = self.responses.borrow_mut();
        match responses
            .iter_mut()
            .find(|(part, queue)| url.contains(*part) && !queue.is_empty())
        {
            Some((_, queue)) => queue.remove(0),
            None => Err(FetchError::Network(format!("no canned response for {url}"))),
        }
    }
}
