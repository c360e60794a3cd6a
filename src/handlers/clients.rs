// handlers/clients.rs

use super::read_json_body;
use crate::db::connection::Database;
use crate::db::{clients, sessions};
use crate::domain::requests::ClientUpdateInput;
use crate::errors::{ResultResp, ServerError};
use crate::responses::json_response;
use astra::Request;
use serde_json::json;

pub fn list_clients(db: &Database) -> ResultResp {
    let all = clients::list_clients(db)?;
    json_response(&json!({ "clients": all }))
}

pub fn get_client(client_id: &str, db: &Database) -> ResultResp {
    let client = clients::get_client(db, client_id)?
        .ok_or_else(|| ServerError::NotFound("Client not found".to_string()))?;
    json_response(&json!({ "client": client }))
}

pub fn update_client(req: Request, client_id: &str, db: &Database) -> ResultResp {
    let input: ClientUpdateInput = read_json_body(req)?;
    let input = input.validate().map_err(ServerError::BadRequest)?;

    let mut client = clients::get_client(db, client_id)?
        .ok_or_else(|| ServerError::NotFound("Client not found".to_string()))?;
    client.name = input.name;
    client.email = input.email.to_lowercase();
    client.notes = input.notes.filter(|n| !n.is_empty());
    clients::save_client(db, &client)?;

    json_response(&json!({ "client": client }))
}

pub fn delete_client(client_id: &str, db: &Database) -> ResultResp {
    if !clients::delete_client(db, client_id)? {
        return Err(ServerError::NotFound("Client not found".to_string()));
    }
    sessions::delete_sessions_for_client(db, client_id)?;
    json_response(&json!({ "ok": true }))
}
