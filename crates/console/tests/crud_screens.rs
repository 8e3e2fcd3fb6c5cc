//! Generic CRUD screens against a fake backend.

mod common;

use assert_matches::assert_matches;
use common::Scripted;
use pidgen_client::ApiError;
use pidgen_console::crud::{CrudScreen, Customers, Roles, Users};
use pidgen_console::projects::Outcome;
use pidgen_core::models::customer::CustomerPayload;
use pidgen_core::models::role::RolePayload;
use pidgen_core::models::user::UserPayload;
use pidgen_core::roles::Role;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn user_payload() -> UserPayload {
    UserPayload {
        username: "jdoe".into(),
        email: "jdoe@example.com".into(),
        password: None,
        first_name: "J".into(),
        last_name: "Doe".into(),
        role_id: 2,
        is_active: true,
    }
}

#[tokio::test]
async fn test_declined_user_delete_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "userId": 9, "username": "jdoe", "email": "jdoe@example.com", "isActive": true }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let confirmer = Scripted::no();
    let screen = CrudScreen::new(
        Users,
        common::client(&server, Role::SuperAdmin),
        confirmer.clone(),
    );
    screen.load().await.unwrap();

    assert_eq!(screen.delete(9).await.unwrap(), Outcome::Cancelled);
    assert_eq!(confirmer.times_asked(), 1);
    assert!(screen.find(9).is_some());
    assert!(screen.with_state(|s| s.delete == pidgen_core::operation::OpStatus::Idle));
}

#[tokio::test]
async fn test_confirmed_role_delete_reloads_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Roles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "roleId": 1, "roleName": "Admin", "isActive": true },
            { "roleId": 3, "roleName": "Viewer", "isActive": true }
        ])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/Roles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "roleId": 1, "roleName": "Admin", "isActive": true }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/Roles/3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let screen = CrudScreen::new(Roles, common::client(&server, Role::SuperAdmin), Scripted::yes());
    assert_eq!(screen.load().await.unwrap().len(), 2);
    assert_eq!(screen.delete(3).await.unwrap(), Outcome::Applied);
    assert_eq!(screen.records().len(), 1);
}

#[tokio::test]
async fn test_customer_without_name_is_rejected_locally() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let screen = CrudScreen::new(Customers, common::client(&server, Role::Admin), Scripted::yes());
    let err = screen.create(&CustomerPayload::default()).await.unwrap_err();
    assert_matches!(err, ApiError::Invalid(_));
    assert!(screen.with_state(|s| s.create.error().is_some()));
}

#[tokio::test]
async fn test_user_field_errors_are_kept_per_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Users"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "errors": { "Username": ["Username is already taken."] }
        })))
        .mount(&server)
        .await;

    let screen = CrudScreen::new(Users, common::client(&server, Role::SuperAdmin), Scripted::yes());
    let payload = user_payload().with_password("s3cret!", false).unwrap();
    let err = screen.create(&payload).await.unwrap_err();
    assert_eq!(
        err.field_errors().unwrap()["Username"],
        vec!["Username is already taken.".to_string()]
    );
}

#[tokio::test]
async fn test_user_edit_with_blank_password_keeps_it() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/Users/9"))
        .and(body_json(serde_json::json!({
            "username": "jdoe",
            "email": "jdoe@example.com",
            "firstName": "J",
            "lastName": "Doe",
            "roleId": 2,
            "isActive": true
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let screen = CrudScreen::new(Users, common::client(&server, Role::SuperAdmin), Scripted::yes());
    let payload = user_payload().with_password("", true).unwrap();
    screen.update(9, &payload).await.unwrap();
    assert!(screen.with_state(|s| s.update.value().is_some()));
}

#[tokio::test]
async fn test_role_create_posts_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Roles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/Roles"))
        .and(body_json(serde_json::json!({ "roleName": "Auditor", "isActive": true })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let screen = CrudScreen::new(Roles, common::client(&server, Role::SuperAdmin), Scripted::yes());
    screen
        .create(&RolePayload {
            role_name: "Auditor".into(),
            is_active: true,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_user_without_role_is_rejected_locally() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let screen = CrudScreen::new(Users, common::client(&server, Role::SuperAdmin), Scripted::yes());
    screen.load().await.unwrap();

    let payload = UserPayload {
        role_id: 0,
        password: Some("s3cret!".into()),
        ..user_payload()
    };
    let err = screen.create(&payload).await.unwrap_err();
    assert_matches!(err, ApiError::Invalid(ref msg) if msg.contains("Role is required"));
}
