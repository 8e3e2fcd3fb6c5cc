#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use pidgen_client::{ApiClient, MemorySessionStore, Session};
use pidgen_console::confirm::Confirmer;
use pidgen_core::lifecycle::IdPolicy;
use pidgen_core::models::auth::UserInfo;
use pidgen_core::roles::Role;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Answers prompts from a script and counts how often it was asked.
#[derive(Debug, Default)]
pub struct Scripted {
    pub answer: bool,
    pub remarks: Option<String>,
    pub asked: AtomicUsize,
}

impl Scripted {
    pub fn yes() -> Arc<Self> {
        Arc::new(Self {
            answer: true,
            ..Default::default()
        })
    }

    pub fn no() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_remarks(remarks: &str) -> Arc<Self> {
        Arc::new(Self {
            answer: true,
            remarks: Some(remarks.to_string()),
            ..Default::default()
        })
    }

    pub fn times_asked(&self) -> usize {
        self.asked.load(Ordering::SeqCst)
    }
}

impl Confirmer for Scripted {
    fn confirm(&self, _prompt: &str) -> bool {
        self.asked.fetch_add(1, Ordering::SeqCst);
        self.answer
    }

    fn collect_remarks(&self, _prompt: &str, default: &str) -> Option<String> {
        self.asked.fetch_add(1, Ordering::SeqCst);
        if !self.answer {
            return None;
        }
        Some(self.remarks.clone().unwrap_or_else(|| default.to_string()))
    }
}

pub fn client(server: &MockServer, role: Role) -> Arc<ApiClient> {
    client_with_policy(server, role, IdPolicy::Observed)
}

pub fn client_with_policy(server: &MockServer, role: Role, policy: IdPolicy) -> Arc<ApiClient> {
    let session = Session::new(UserInfo {
        token: "test-token".into(),
        username: Some("tester".into()),
        role: Some(role),
        user_id: Some(1),
    });
    Arc::new(ApiClient::with_client(
        reqwest::Client::new(),
        server.uri(),
        policy,
        Arc::new(MemorySessionStore::with_session(session)),
    ))
}

/// One project row; `coreProjectID` is `internal_id * 100`.
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

/// Serve `body` for `GET /Projects` until replaced by a later mount.
pub async fn mount_projects(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/Projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Serve `body` for exactly one `GET /Projects`.
pub async fn mount_projects_once(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/Projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .up_to_n_times(1)
        .mount(server)
        .await;
}

pub async fn mount_reference(server: &MockServer) {
    let lists = [
        (
            "/Customers",
            serde_json::json!([{ "customerID": 3, "customerName": "Acme", "customerCode": "ACM" }]),
        ),
        (
            "/BusinessUnits",
            serde_json::json!([{ "buid": 2, "buName": "Cloud", "buCode": "CL" }]),
        ),
        (
            "/BillingTypes",
            serde_json::json!([
                { "billingTypeID": 1, "billingTypeName": "Fixed", "billingTypeCode": "FX" }
            ]),
        ),
        (
            "/Segments",
            serde_json::json!([{ "segmentID": 4, "segmentName": "Retail" }]),
        ),
    ];
    for (route, body) in lists {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }
}
