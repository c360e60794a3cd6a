// config.rs
use std::env;

const DEFAULT_AGENT_SIGNATURE: &str = "Best regards,\nYour Buyer's Agent";

/// Process-wide configuration, read from the environment once at startup
/// and passed down explicitly so the pipeline never touches env globals.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub db_path: String,
    pub schema_path: String,
    /// Credential for the search providers and the detail lookup.
    pub rapidapi_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub brevo_api_key: Option<String>,
    pub sender_email: Option<String>,
    pub sender_name: String,
    /// Appended to every drafted client email.
    pub agent_signature: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: var("BIND_ADDR").unwrap_or_else(|| "127.0.0.1:3000".into()),
            db_path: var("DB_PATH").unwrap_or_else(|| "propertybot.sqlite3".into()),
            schema_path: var("SCHEMA_PATH").unwrap_or_else(|| "sql/schema.sql".into()),
            rapidapi_key: var("RAPIDAPI_KEY"),
            gemini_api_key: var("GEMINI_API_KEY"),
            brevo_api_key: var("BREVO_API_KEY"),
            sender_email: var("SENDER_EMAIL"),
            sender_name: var("SENDER_NAME").unwrap_or_else(|| "Property Updates".into()),
            agent_signature: var("AGENT_SIGNATURE")
                .unwrap_or_else(|| DEFAULT_AGENT_SIGNATURE.into()),
        }
    }
}

/// Read a trimmed env var, treating empty values as unset.
fn var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
