use crate::db::{clients, sessions};
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::router_tests::{seed_client, seed_session};
use crate::tests::utils::{init_test_db, test_config};
use astra::Body;
use http::{Method, Request};
use std::io::Read;

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.as_bytes().to_vec()))
        .unwrap()
}

#[test]
fn get_search_returns_session_and_client() {
    let db = init_test_db();
    let config = test_config();
    let client = seed_client(&db);
    let session = seed_session(&db, &client);

    let req = Request::builder()
        .method(Method::GET)
        .uri(format!("/api/search/{}", session.id))
        .body(Body::empty())
        .unwrap();

    let resp = handle(req, &db, &config).expect("Failed to handle request");
    assert_eq!(resp.status(), 200);

    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    assert!(body.contains(&session.id));
    assert!(body.contains("Jane Buyer"));
    assert!(body.contains("1 Main St, Pottsville, PA 17901"));
}

#[test]
fn select_properties_parses_the_payload_before_looking_up_the_session() {
    let db = init_test_db();
    let config = test_config();

    let req = post_json("/api/search/missing/selectProperties", "{broken");
    match handle(req, &db, &config) {
        Err(ServerError::BadRequest(msg)) => assert!(msg.starts_with("Invalid payload")),
        other => panic!("expected BadRequest, got: {other:?}"),
    }

    let req = post_json(
        "/api/search/missing/selectProperties",
        r#"{"selectedPropertyIds":["prop-1"]}"#,
    );
    match handle(req, &db, &config) {
        Err(ServerError::NotFound(msg)) => assert_eq!(msg, "Search not found"),
        other => panic!("expected NotFound, got: {other:?}"),
    }
}

#[test]
fn select_properties_rejects_unknown_ids() {
    let db = init_test_db();
    let config = test_config();
    let client = seed_client(&db);
    let session = seed_session(&db, &client);

    let req = post_json(
        &format!("/api/search/{}/selectProperties", session.id),
        r#"{"selectedPropertyIds":["prop-1","bogus"]}"#,
    );
    match handle(req, &db, &config) {
        Err(ServerError::BadRequest(msg)) => {
            assert_eq!(msg, "One or more property IDs are invalid")
        }
        other => panic!("expected BadRequest, got: {other:?}"),
    }
}

#[test]
fn select_properties_persists_the_selection() {
    let db = init_test_db();
    let config = test_config();
    let client = seed_client(&db);
    let session = seed_session(&db, &client);

    let req = post_json(
        &format!("/api/search/{}/selectProperties", session.id),
        r#"{"selectedPropertyIds":["prop-1"]}"#,
    );
    let resp = handle(req, &db, &config).expect("Failed to handle request");
    assert_eq!(resp.status(), 200);

    let stored = sessions::get_session(&db, &session.id)
        .expect("get session")
        .expect("session exists");
    assert_eq!(
        stored.selected_property_ids,
        Some(vec!["prop-1".to_string()])
    );
}

#[test]
fn draft_email_requires_a_selection() {
    let db = init_test_db();
    let config = test_config();
    let client = seed_client(&db);
    let session = seed_session(&db, &client);

    let req = post_json(&format!("/api/search/{}/draftEmail", session.id), "{}");
    match handle(req, &db, &config) {
        Err(ServerError::BadRequest(msg)) => assert_eq!(msg, "No properties selected"),
        other => panic!("expected BadRequest, got: {other:?}"),
    }
}

#[test]
fn send_email_without_mail_credentials_fails_cleanly() {
    let db = init_test_db();
    let config = test_config();
    let client = seed_client(&db);
    let mut session = seed_session(&db, &client);

    // A selection is all that gates sending; no draft is required first.
    session.selected_property_ids = Some(vec!["prop-1".into()]);
    sessions::save_session(&db, &session).expect("save session");

    let req = post_json(
        &format!("/api/search/{}/sendEmail", session.id),
        r#"{"to":"jane@example.com","subject":"Homes for your review","body":"Hi Jane, here are the homes we discussed this week."}"#,
    );
    match handle(req, &db, &config) {
        Err(ServerError::Config(msg)) => assert_eq!(msg, "Email not configured"),
        other => panic!("expected Config error, got: {other:?}"),
    }
}

#[test]
fn send_email_requires_a_selection() {
    let db = init_test_db();
    let config = test_config();
    let client = seed_client(&db);
    let session = seed_session(&db, &client);

    let req = post_json(
        &format!("/api/search/{}/sendEmail", session.id),
        r#"{"to":"jane@example.com","subject":"Homes for your review","body":"Hi Jane, here are the homes we discussed this week."}"#,
    );
    match handle(req, &db, &config) {
        Err(ServerError::BadRequest(msg)) => assert_eq!(msg, "No properties selected"),
        other => panic!("expected BadRequest, got: {other:?}"),
    }
}

#[test]
fn deleting_a_search_removes_its_summary() {
    let db = init_test_db();
    let config = test_config();
    let client = seed_client(&db);
    let session = seed_session(&db, &client);

    let req = Request::builder()
        .method(Method::DELETE)
        .uri(format!("/api/search/{}", session.id))
        .body(Body::empty())
        .unwrap();
    let resp = handle(req, &db, &config).expect("Failed to handle request");
    assert_eq!(resp.status(), 200);

    assert!(sessions::get_session(&db, &session.id)
        .expect("get session")
        .is_none());
    let stored = clients::get_client(&db, &client.id)
        .expect("get client")
        .expect("client exists");
    assert!(stored.searches.is_empty());
}
