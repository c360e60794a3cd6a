use crate::config::AppConfig;
use crate::db::connection::{init_db, Database};
use crate::responses::error_to_response;
use crate::router::handle;
use astra::Server;
use std::net::SocketAddr;

mod ai;
mod config;
mod db;
mod details;
mod domain;
mod errors;
mod fusion;
mod handlers;
mod ids;
mod mailer;
mod responses;
mod router;
mod search;
mod spreadsheets;

#[cfg(test)]
mod tests;

fn main() {
    // Configuration is read once here and passed down explicitly.
    let config = AppConfig::from_env();

    let db = Database::new(config.db_path.clone());
    if let Err(e) = init_db(&db, &config.schema_path) {
        eprintln!("❌ Database initialization failed: {e}");
        std::process::exit(1);
    }

    let addr: SocketAddr = match config.bind_addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            eprintln!("Invalid BIND_ADDR {:?}: {e}", config.bind_addr);
            std::process::exit(1);
        }
    };
    println!("Starting server at http://{addr}");

    let server = Server::bind(&addr).max_workers(8);

    let result = server.serve(move |req, _info| match handle(req, &db, &config) {
        Ok(resp) => resp,
        Err(err) => error_to_response(err),
    });

    if let Err(e) = result {
        eprintln!("Server ended with error: {e}");
    }

    println!("Server shut down cleanly.");
}
