use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::router_tests::seed_client;
use crate::tests::utils::{init_test_db, test_config};
use astra::Body;
use http::{Method, Request};
use std::io::Read;

#[test]
fn listing_clients_starts_empty() {
    let db = init_test_db();
    let config = test_config();

    let req = Request::builder()
        .method(Method::GET)
        .uri("/api/clients")
        .body(Body::empty())
        .unwrap();

    let resp = handle(req, &db, &config).expect("Failed to handle request");
    assert_eq!(resp.status(), 200);

    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    assert!(body.contains("\"clients\":[]"));
}

#[test]
fn fetches_a_seeded_client() {
    let db = init_test_db();
    let config = test_config();
    let client = seed_client(&db);

    let req = Request::builder()
        .method(Method::GET)
        .uri(format!("/api/clients/{}", client.id))
        .body(Body::empty())
        .unwrap();

    let resp = handle(req, &db, &config).expect("Failed to handle request");
    assert_eq!(resp.status(), 200);

    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    assert!(body.contains("Jane Buyer"));
    assert!(body.contains("jane@example.com"));
}

#[test]
fn unknown_client_is_not_found() {
    let db = init_test_db();
    let config = test_config();

    let req = Request::builder()
        .method(Method::GET)
        .uri("/api/clients/does-not-exist")
        .body(Body::empty())
        .unwrap();

    match handle(req, &db, &config) {
        Err(ServerError::NotFound(_)) => {}
        other => panic!("expected NotFound, got: {other:?}"),
    }
}

#[test]
fn update_rejects_an_invalid_email() {
    let db = init_test_db();
    let config = test_config();
    let client = seed_client(&db);

    let req = Request::builder()
        .method(Method::PATCH)
        .uri(format!("/api/clients/{}", client.id))
        .header("Content-Type", "application/json")
        .body(Body::from(
            r#"{"name":"Jane Buyer","email":"not-an-email"}"#.as_bytes().to_vec(),
        ))
        .unwrap();

    match handle(req, &db, &config) {
        Err(ServerError::BadRequest(msg)) => assert_eq!(msg, "Valid email required"),
        other => panic!("expected BadRequest, got: {other:?}"),
    }
}

#[test]
fn update_persists_trimmed_fields() {
    let db = init_test_db();
    let config = test_config();
    let client = seed_client(&db);

    let req = Request::builder()
        .method(Method::PATCH)
        .uri(format!("/api/clients/{}", client.id))
        .header("Content-Type", "application/json")
        .body(Body::from(
            r#"{"name":"  Jane B. Buyer  ","email":"Jane.New@Example.com","notes":" relocating "}"#
                .as_bytes()
                .to_vec(),
        ))
        .unwrap();

    let resp = handle(req, &db, &config).expect("Failed to handle request");
    assert_eq!(resp.status(), 200);

    let updated = crate::db::clients::get_client(&db, &client.id)
        .expect("get client")
        .expect("client exists");
    assert_eq!(updated.name, "Jane B. Buyer");
    assert_eq!(updated.email, "jane.new@example.com");
    assert_eq!(updated.notes.as_deref(), Some("relocating"));
}

#[test]
fn delete_removes_the_client() {
    let db = init_test_db();
    let config = test_config();
    let client = seed_client(&db);

    let req = Request::builder()
        .method(Method::DELETE)
        .uri(format!("/api/clients/{}", client.id))
        .body(Body::empty())
        .unwrap();

    let resp = handle(req, &db, &config).expect("Failed to handle request");
    assert_eq!(resp.status(), 200);

    let gone = crate::db::clients::get_client(&db, &client.id).expect("get client");
    assert!(gone.is_none());
}
