use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{init_test_db, test_config};
use astra::Body;
use http::{Method, Request};

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.as_bytes().to_vec()))
        .unwrap()
}

#[test]
fn create_search_rejects_malformed_json() {
    let db = init_test_db();
    let config = test_config();

    let req = post_json("/api/search/create", "{not json");
    match handle(req, &db, &config) {
        Err(ServerError::BadRequest(msg)) => assert!(msg.starts_with("Invalid payload")),
        other => panic!("expected BadRequest, got: {other:?}"),
    }
}

#[test]
fn create_search_validates_the_brief() {
    let db = init_test_db();
    let config = test_config();

    let req = post_json(
        "/api/search/create",
        r#"{"clientName":"","clientEmail":"jane@example.com","preferredLocation":"Pottsville, PA","clientNotes":"3 beds"}"#,
    );
    match handle(req, &db, &config) {
        Err(ServerError::BadRequest(msg)) => assert_eq!(msg, "Client name is required"),
        other => panic!("expected BadRequest, got: {other:?}"),
    }
}

#[test]
fn create_search_requires_the_provider_credential() {
    // No network involved: the credential check fires before any fetch.
    let db = init_test_db();
    let config = test_config();

    let req = post_json(
        "/api/search/create",
        r#"{"clientName":"Jane Buyer","clientEmail":"jane@example.com","preferredLocation":"Pottsville, PA","clientNotes":"3 beds, quiet street"}"#,
    );
    match handle(req, &db, &config) {
        Err(ServerError::Config(msg)) => assert_eq!(msg, "RAPIDAPI_KEY missing"),
        other => panic!("expected Config error, got: {other:?}"),
    }
}

#[test]
fn unknown_route_is_not_found() {
    let db = init_test_db();
    let config = test_config();

    let req = Request::builder()
        .method(Method::GET)
        .uri("/api/nope")
        .body(Body::empty())
        .unwrap();
    match handle(req, &db, &config) {
        Err(ServerError::NotFound(_)) => {}
        other => panic!("expected NotFound, got: {other:?}"),
    }
}

#[test]
fn export_of_a_missing_search_is_not_found() {
    let db = init_test_db();
    let config = test_config();

    let req = Request::builder()
        .method(Method::GET)
        .uri("/api/search/missing/export.xlsx")
        .body(Body::empty())
        .unwrap();
    match handle(req, &db, &config) {
        Err(ServerError::NotFound(msg)) => assert_eq!(msg, "Search not found"),
        other => panic!("expected NotFound, got: {other:?}"),
    }
}
