//! Sign-in, bearer propagation and session persistence against a fake
//! backend.

mod common;

use std::sync::Arc;

use assert_matches::assert_matches;
use pidgen_client::api::REQUEST_ID_HEADER;
use pidgen_client::{ApiError, FileSessionStore, SessionStore};
use pidgen_core::roles::Role;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_login_then_list_sends_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/Auth/login"))
        .and(body_json(serde_json::json!({ "username": "admin", "password": "secret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token": "abc123",
            "username": "admin",
            "role": "Admin",
            "userId": 5
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/Projects"))
        .and(header("authorization", "Bearer abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            common::project_json(1, "Draft", "2024-01-01T00:00:00")
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileSessionStore::new(dir.path().join("session.json")));
    let client = common::client_with_store(&server, store.clone());

    let session = client.login("admin", "secret").await.unwrap();
    assert_eq!(session.role(), Role::Admin);
    assert_eq!(store.load().unwrap().unwrap().token(), "abc123");

    let projects = client.list_projects().await.unwrap();
    assert_eq!(projects.len(), 1);
}

#[tokio::test]
async fn test_stored_session_is_restored_and_logout_clears_it() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileSessionStore::new(dir.path().join("session.json")));
    store.save(&common::session(Role::SuperAdmin)).unwrap();

    let client = common::client_with_store(&server, store.clone());
    assert_eq!(client.session().unwrap().role(), Role::SuperAdmin);

    client.logout().unwrap();
    assert!(client.session().is_none());
    assert!(store.load().unwrap().is_none());
}

#[tokio::test]
async fn test_bad_credentials_are_unauthorized_and_nothing_is_stored() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/Auth/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({ "message": "Invalid username or password" })),
        )
        .mount(&server)
        .await;

    let client = common::client(&server);
    let err = client.login("admin", "wrong").await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Unauthorized("Invalid username or password".into())
    );
    assert!(client.session().is_none());
}

#[tokio::test]
async fn test_blank_credentials_never_reach_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = common::client(&server);
    assert_matches!(client.login("  ", "x").await, Err(ApiError::Invalid(_)));
}

#[tokio::test]
async fn test_every_request_carries_a_request_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/Segments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let client = common::client(&server);
    client.list_segments().await.unwrap();
    client.list_segments().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let ids: Vec<String> = requests
        .iter()
        .map(|r| {
            r.headers
                .get(REQUEST_ID_HEADER)
                .unwrap()
                .to_str()
                .unwrap()
                .to_string()
        })
        .collect();
    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);
    assert!(uuid::Uuid::parse_str(&ids[0]).is_ok());
    // Signed out: no bearer token.
    assert!(requests[0].headers.get("authorization").is_none());
}
