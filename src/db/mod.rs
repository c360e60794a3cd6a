pub mod clients;
pub mod connection;
pub mod sessions;
