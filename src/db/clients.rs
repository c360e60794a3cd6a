// db/clients.rs
//
// Client records are stored as JSON payloads keyed by id, with a lowercased
// email column for lookups. Summaries of each search live on the client
// record itself, newest first.

use super::connection::Database;
use crate::domain::types::{Client, SearchSessionSummary};
use crate::errors::ServerError;
use chrono::Utc;
use rusqlite::{params, OptionalExtension};

use crate::ids::generate_id;

fn parse_client(payload: &str) -> Result<Client, ServerError> {
    serde_json::from_str(payload)
        .map_err(|e| ServerError::DbError(format!("Corrupt client payload: {e}")))
}

pub fn save_client(db: &Database, client: &Client) -> Result<(), ServerError> {
    let payload = serde_json::to_string(client)
        .map_err(|e| ServerError::DbError(format!("Serialize client failed: {e}")))?;
    db.with_conn(|conn| {
        conn.execute(
            "INSERT OR REPLACE INTO clients (id, email, created_at, payload) VALUES (?1, ?2, ?3, ?4)",
            params![
                client.id,
                client.email.to_lowercase(),
                client.created_at,
                payload
            ],
        )
        .map_err(|e| ServerError::DbError(format!("Save client failed: {e}")))?;
        Ok(())
    })
}

pub fn get_client(db: &Database, id: &str) -> Result<Option<Client>, ServerError> {
    let payload: Option<String> = db.with_conn(|conn| {
        conn.query_row(
            "SELECT payload FROM clients WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| ServerError::DbError(format!("Get client failed: {e}")))
    })?;
    payload.map(|p| parse_client(&p)).transpose()
}

pub fn get_client_by_email(db: &Database, email: &str) -> Result<Option<Client>, ServerError> {
    let payload: Option<String> = db.with_conn(|conn| {
        conn.query_row(
            "SELECT payload FROM clients WHERE email = ?1",
            params![email.to_lowercase()],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| ServerError::DbError(format!("Get client by email failed: {e}")))
    })?;
    payload.map(|p| parse_client(&p)).transpose()
}

pub fn list_clients(db: &Database) -> Result<Vec<Client>, ServerError> {
    let payloads: Vec<String> = db.with_conn(|conn| {
        let mut stmt = conn
            .prepare("SELECT payload FROM clients ORDER BY created_at DESC")
            .map_err(|e| ServerError::DbError(format!("List clients failed: {e}")))?;
        let rows = stmt
            .query_map([], |row| row.get(0))
            .map_err(|e| ServerError::DbError(format!("List clients failed: {e}")))?;
        rows.collect::<Result<Vec<String>, _>>()
            .map_err(|e| ServerError::DbError(format!("List clients failed: {e}")))
    })?;
    payloads.iter().map(|p| parse_client(p)).collect()
}

pub fn delete_client(db: &Database, id: &str) -> Result<bool, ServerError> {
    db.with_conn(|conn| {
        let changed = conn
            .execute("DELETE FROM clients WHERE id = ?1", params![id])
            .map_err(|e| ServerError::DbError(format!("Delete client failed: {e}")))?;
        Ok(changed > 0)
    })
}

/// Look a client up by email, creating one if absent. An existing client's
/// name is refreshed when the incoming name differs.
pub fn get_or_create_by_email(
    db: &Database,
    name: &str,
    email: &str,
) -> Result<Client, ServerError> {
    if let Some(mut existing) = get_client_by_email(db, email)? {
        if existing.name != name {
            existing.name = name.to_string();
            save_client(db, &existing)?;
        }
        return Ok(existing);
    }

    let client = Client {
        id: generate_id(),
        name: name.to_string(),
        email: email.to_lowercase(),
        notes: None,
        created_at: Utc::now().to_rfc3339(),
        searches: Vec::new(),
    };
    save_client(db, &client)?;
    Ok(client)
}

/// Insert or replace a summary at the head of the client's search list.
pub fn append_search_summary(
    db: &Database,
    client_id: &str,
    summary: SearchSessionSummary,
) -> Result<(), ServerError> {
    let Some(mut client) = get_client(db, client_id)? else {
        return Err(ServerError::NotFound("Client not found".to_string()));
    };
    client.searches.retain(|s| s.id != summary.id);
    client.searches.insert(0, summary);
    save_client(db, &client)
}

pub fn set_summary_email_sent(
    db: &Database,
    client_id: &str,
    search_id: &str,
) -> Result<(), ServerError> {
    let Some(mut client) = get_client(db, client_id)? else {
        return Err(ServerError::NotFound("Client not found".to_string()));
    };
    for summary in client.searches.iter_mut() {
        if summary.id == search_id {
            summary.has_email_sent = true;
        }
    }
    save_client(db, &client)
}

pub fn remove_search_summary(
    db: &Database,
    client_id: &str,
    search_id: &str,
) -> Result<(), ServerError> {
    let Some(mut client) = get_client(db, client_id)? else {
        return Ok(());
    };
    client.searches.retain(|s| s.id != search_id);
    save_client(db, &client)
}
