//! User endpoints.

use pidgen_core::models::user::{User, UserPayload};
use pidgen_core::types::DbId;
use reqwest::Method;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::routes;

impl ApiClient {
    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.get_list(routes::USERS).await
    }

    pub async fn create_user(&self, payload: &UserPayload) -> Result<(), ApiError> {
        self.send_unit(Method::POST, routes::USERS, Some(payload))
            .await
    }

    /// A payload with `password: None` leaves the stored password unchanged.
    pub async fn update_user(&self, id: DbId, payload: &UserPayload) -> Result<(), ApiError> {
        self.send_unit(Method::PUT, &routes::user(id), Some(payload))
            .await
    }

    pub async fn delete_user(&self, id: DbId) -> Result<(), ApiError> {
        self.send_unit::<()>(Method::DELETE, &routes::user(id), None)
            .await
    }
}
