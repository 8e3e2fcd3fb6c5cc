//! Customer endpoints.

use pidgen_core::models::customer::{Customer, CustomerPayload};
use pidgen_core::types::DbId;
use reqwest::Method;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::routes;

impl ApiClient {
    pub async fn list_customers(&self) -> Result<Vec<Customer>, ApiError> {
        self.get_list(routes::CUSTOMERS).await
    }

    pub async fn create_customer(&self, payload: &CustomerPayload) -> Result<(), ApiError> {
        self.send_unit(Method::POST, routes::CUSTOMERS, Some(payload))
            .await
    }

    pub async fn update_customer(
        &self,
        id: DbId,
        payload: &CustomerPayload,
    ) -> Result<(), ApiError> {
        self.send_unit(Method::PUT, &routes::customer(id), Some(payload))
            .await
    }

    pub async fn delete_customer(&self, id: DbId) -> Result<(), ApiError> {
        self.send_unit::<()>(Method::DELETE, &routes::customer(id), None)
            .await
    }
}
