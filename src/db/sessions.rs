// db/sessions.rs

use super::connection::Database;
use crate::domain::types::{FinalEmailRecord, SearchSession};
use crate::errors::ServerError;
use rusqlite::{params, OptionalExtension};

pub fn save_session(db: &Database, session: &SearchSession) -> Result<(), ServerError> {
    let payload = serde_json::to_string(session)
        .map_err(|e| ServerError::DbError(format!("Serialize session failed: {e}")))?;
    db.with_conn(|conn| {
        conn.execute(
            "INSERT OR REPLACE INTO search_sessions (id, client_id, created_at, payload) VALUES (?1, ?2, ?3, ?4)",
            params![session.id, session.client_id, session.created_at, payload],
        )
        .map_err(|e| ServerError::DbError(format!("Save session failed: {e}")))?;
        Ok(())
    })
}

pub fn get_session(db: &Database, id: &str) -> Result<Option<SearchSession>, ServerError> {
    let payload: Option<String> = db.with_conn(|conn| {
        conn.query_row(
            "SELECT payload FROM search_sessions WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| ServerError::DbError(format!("Get session failed: {e}")))
    })?;
    payload
        .map(|p| {
            serde_json::from_str(&p)
                .map_err(|e| ServerError::DbError(format!("Corrupt session payload: {e}")))
        })
        .transpose()
}

pub fn delete_session(db: &Database, id: &str) -> Result<bool, ServerError> {
    db.with_conn(|conn| {
        let changed = conn
            .execute("DELETE FROM search_sessions WHERE id = ?1", params![id])
            .map_err(|e| ServerError::DbError(format!("Delete session failed: {e}")))?;
        Ok(changed > 0)
    })
}

/// Cascade used when a client is removed.
pub fn delete_sessions_for_client(db: &Database, client_id: &str) -> Result<(), ServerError> {
    db.with_conn(|conn| {
        conn.execute(
            "DELETE FROM search_sessions WHERE client_id = ?1",
            params![client_id],
        )
        .map_err(|e| ServerError::DbError(format!("Delete client sessions failed: {e}")))?;
        Ok(())
    })
}

/// Append-only audit trail of outbound emails.
pub fn log_email_send(
    db: &Database,
    client_id: &str,
    search_id: &str,
    record: &FinalEmailRecord,
) -> Result<(), ServerError> {
    let payload = serde_json::to_string(record)
        .map_err(|e| ServerError::DbError(format!("Serialize email record failed: {e}")))?;
    db.with_conn(|conn| {
        conn.execute(
            "INSERT INTO email_log (client_id, search_id, sent_at, payload) VALUES (?1, ?2, ?3, ?4)",
            params![client_id, search_id, record.sent_at, payload],
        )
        .map_err(|e| ServerError::DbError(format!("Log email failed: {e}")))?;
        Ok(())
    })
}
