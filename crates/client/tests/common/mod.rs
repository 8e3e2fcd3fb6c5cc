#![allow(dead_code)]

use std::sync::Arc;

use pidgen_client::{ApiClient, MemorySessionStore, Session, SessionStore};
use pidgen_core::lifecycle::IdPolicy;
use pidgen_core::models::auth::UserInfo;
use pidgen_core::roles::Role;
use wiremock::MockServer;

/// A signed-in session for `role` with a fixed token.
pub fn session(role: Role) -> Session {
    Session::new(UserInfo {
        token: format!("token-{}", role.as_str().to_lowercase()),
        username: Some(role.as_str().to_lowercase()),
        role: Some(role),
        user_id: Some(1),
    })
}

/// A client pointed at `server` that starts signed out.
pub fn client(server: &MockServer) -> ApiClient {
    client_with_store(server, Arc::new(MemorySessionStore::new()))
}

/// A client pointed at `server` that starts signed in as `role`.
pub fn signed_in_client(server: &MockServer, role: Role) -> ApiClient {
    client_with_store(server, Arc::new(MemorySessionStore::with_session(session(role))))
}

/// A client pointed at an arbitrary base URL that starts signed in as `role`.
pub fn signed_in_client_at(base_url: &str, role: Role) -> ApiClient {
    ApiClient::with_client(
        reqwest::Client::new(),
        base_url.to_string(),
        IdPolicy::Observed,
        Arc::new(MemorySessionStore::with_session(session(role))),
    )
}

pub fn client_with_store(server: &MockServer, store: Arc<dyn SessionStore>) -> ApiClient {
    ApiClient::with_client(
        reqwest::Client::new(),
        format!("{}/api", server.uri()),
        IdPolicy::Observed,
        store,
    )
}

/// One project row in the backend's wire shape.
pub fn project_json(internal_id: i64, status: &str, created: &str) -> serde_json::Value {
    serde_json::json!({
        "projectInternalID": internal_id,
        "coreProjectID": internal_id * 100,
        "projectName": format!("Project {internal_id}"),
        "projectAbbreviation": "PRJ",
        "customerID": 3,
        "buid": 2,
        "billingTypeID": 1,
        "segmentID": 4,
        "projectLocationCity": "Pune",
        "customerAddress": "1 Main St",
        "projectStartDate": "2024-01-01T00:00:00",
        "projectEndDate": "2024-12-31T00:00:00",
        "resourceRequirement": "2 devs",
        "status": status,
        "createdDate": created
    })
}
