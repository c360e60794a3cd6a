// handlers/sessions.rs
//
// Session lifecycle after the initial search: inspect, select properties,
// draft the client email, send it, delete.

use super::read_json_body;
use crate::ai::{draft_email_for_selection, GeminiClient};
use crate::config::AppConfig;
use crate::db::connection::Database;
use crate::db::{clients, sessions};
use crate::domain::requests::{EmailSendInput, SelectPropertiesInput};
use crate::domain::types::FinalEmailRecord;
use crate::errors::{ResultResp, ServerError};
use crate::mailer::{BrevoMailer, MailerError};
use crate::responses::json_response;
use astra::Request;
use chrono::Utc;
use serde_json::json;
use std::collections::HashSet;

fn require_session(db: &Database, search_id: &str) -> Result<crate::domain::types::SearchSession, ServerError> {
    sessions::get_session(db, search_id)?
        .ok_or_else(|| ServerError::NotFound("Search not found".to_string()))
}

pub fn get_search(search_id: &str, db: &Database) -> ResultResp {
    let session = require_session(db, search_id)?;
    let client = clients::get_client(db, &session.client_id)?;
    json_response(&json!({
        "session": session,
        "client": client,
    }))
}

pub fn delete_search(search_id: &str, db: &Database) -> ResultResp {
    let session = require_session(db, search_id)?;
    sessions::delete_session(db, search_id)?;
    clients::remove_search_summary(db, &session.client_id, search_id)?;
    json_response(&json!({ "ok": true }))
}

pub fn select_properties(req: Request, search_id: &str, db: &Database) -> ResultResp {
    let input: SelectPropertiesInput = read_json_body(req)?;
    input.validate().map_err(ServerError::BadRequest)?;

    let mut session = require_session(db, search_id)?;

    let known: HashSet<&str> = session
        .evaluated_properties
        .iter()
        .map(|p| p.id.as_str())
        .collect();
    if input
        .selected_property_ids
        .iter()
        .any(|id| !known.contains(id.as_str()))
    {
        return Err(ServerError::BadRequest(
            "One or more property IDs are invalid".to_string(),
        ));
    }

    session.selected_property_ids = Some(input.selected_property_ids);
    sessions::save_session(db, &session)?;
    json_response(&json!({ "ok": true }))
}

pub fn draft_email(search_id: &str, db: &Database, config: &AppConfig) -> ResultResp {
    let mut session = require_session(db, search_id)?;
    let client = clients::get_client(db, &session.client_id)?
        .ok_or_else(|| ServerError::NotFound("Client not found".to_string()))?;

    let selected_ids = session
        .selected_property_ids
        .clone()
        .filter(|ids| !ids.is_empty())
        .ok_or_else(|| ServerError::BadRequest("No properties selected".to_string()))?;

    let selected: Vec<_> = session
        .evaluated_properties
        .iter()
        .filter(|p| selected_ids.contains(&p.id))
        .cloned()
        .collect();
    if selected.is_empty() {
        return Err(ServerError::BadRequest(
            "No selected properties available".to_string(),
        ));
    }

    let gemini_key = config
        .gemini_api_key
        .clone()
        .ok_or_else(|| ServerError::Config("GEMINI_API_KEY missing; cannot compose email.".to_string()))?;
    let gemini = GeminiClient::new(gemini_key).map_err(|e| ServerError::Upstream(e.to_string()))?;

    let draft =
        draft_email_for_selection(&gemini, &client, &session, &selected, &config.agent_signature)?;

    let record = FinalEmailRecord {
        to: Some(client.email.clone()),
        cc: None,
        subject: draft.subject,
        body: draft.body,
        included_property_ids: selected_ids,
        // Empty until the email is actually sent.
        sent_at: String::new(),
        message_id: None,
    };
    session.final_email = Some(record.clone());
    sessions::save_session(db, &session)?;

    json_response(&json!({ "finalEmail": record }))
}

pub fn send_email(req: Request, search_id: &str, db: &Database, config: &AppConfig) -> ResultResp {
    let input: EmailSendInput = read_json_body(req)?;
    input.validate().map_err(ServerError::BadRequest)?;

    let mut session = require_session(db, search_id)?;
    let selected_ids = session
        .selected_property_ids
        .clone()
        .filter(|ids| !ids.is_empty())
        .ok_or_else(|| ServerError::BadRequest("No properties selected".to_string()))?;

    let mailer = BrevoMailer::from_config(config).map_err(|e| match e {
        MailerError::NotConfigured => ServerError::Config(e.to_string()),
        other => ServerError::Upstream(other.to_string()),
    })?;

    let cc = input.cc_list();
    let message_id = mailer
        .send_email(input.to.trim(), &cc, input.subject.trim(), &input.body)
        .map_err(|e| ServerError::Upstream(e.to_string()))?;

    let record = FinalEmailRecord {
        to: Some(input.to.trim().to_string()),
        cc: if cc.is_empty() { None } else { Some(cc) },
        subject: input.subject.trim().to_string(),
        body: input.body.clone(),
        included_property_ids: selected_ids,
        sent_at: Utc::now().to_rfc3339(),
        message_id: message_id.clone(),
    };
    session.final_email = Some(record.clone());
    sessions::save_session(db, &session)?;
    clients::set_summary_email_sent(db, &session.client_id, search_id)?;
    sessions::log_email_send(db, &session.client_id, search_id, &record)?;

    json_response(&json!({ "ok": true, "messageId": message_id }))
}
