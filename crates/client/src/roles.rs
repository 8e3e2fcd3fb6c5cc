//! Role endpoints.

use pidgen_core::models::role::{RolePayload, RoleRecord};
use pidgen_core::types::DbId;
use reqwest::Method;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::routes;

impl ApiClient {
    pub async fn list_roles(&self) -> Result<Vec<RoleRecord>, ApiError> {
        self.get_list(routes::ROLES).await
    }

    pub async fn create_role(&self, payload: &RolePayload) -> Result<(), ApiError> {
        self.send_unit(Method::POST, routes::ROLES, Some(payload))
            .await
    }

    pub async fn update_role(&self, id: DbId, payload: &RolePayload) -> Result<(), ApiError> {
        self.send_unit(Method::PUT, &routes::role(id), Some(payload))
            .await
    }

    pub async fn delete_role(&self, id: DbId) -> Result<(), ApiError> {
        self.send_unit::<()>(Method::DELETE, &routes::role(id), None)
            .await
    }
}
