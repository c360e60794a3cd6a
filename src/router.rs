// router.rs

use crate::config::AppConfig;
use crate::db::connection::Database;
use crate::errors::{ResultResp, ServerError};
use crate::handlers::{clients, search, sessions};
use astra::Request;

pub fn handle(req: Request, db: &Database, config: &AppConfig) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match (method.as_str(), segments.as_slice()) {
        ("POST", ["api", "search", "create"]) => search::create_search(req, db, config),
        ("GET", ["api", "search", id]) => sessions::get_search(id, db),
        ("DELETE", ["api", "search", id]) => sessions::delete_search(id, db),
        ("POST", ["api", "search", id, "selectProperties"]) => {
            let id = id.to_string();
            sessions::select_properties(req, &id, db)
        }
        ("POST", ["api", "search", id, "draftEmail"]) => sessions::draft_email(id, db, config),
        ("POST", ["api", "search", id, "sendEmail"]) => {
            let id = id.to_string();
            sessions::send_email(req, &id, db, config)
        }
        ("GET", ["api", "search", id, "export.xlsx"]) => search::export_search_xlsx(id, db),
        ("GET", ["api", "clients"]) => clients::list_clients(db),
        ("GET", ["api", "clients", id]) => clients::get_client(id, db),
        ("PATCH", ["api", "clients", id]) => {
            let id = id.to_string();
            clients::update_client(req, &id, db)
        }
        ("DELETE", ["api", "clients", id]) => clients::delete_client(id, db),
        _ => Err(ServerError::NotFound("Not Found".to_string())),
    }
}
