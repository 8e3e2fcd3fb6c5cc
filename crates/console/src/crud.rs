//! Generic list/create/update/delete screen for Customers, Users and Roles.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pidgen_client::{ApiClient, ApiError};
use pidgen_core::models::customer::{Customer, CustomerPayload};
use pidgen_core::models::role::{RolePayload, RoleRecord};
use pidgen_core::models::user::{User, UserPayload};
use pidgen_core::operation::OpStatus;
use pidgen_core::payload::validate_payload;
use pidgen_core::types::DbId;
use validator::Validate;

use crate::confirm::Confirmer;
use crate::projects::Outcome;

/// One backend collection with the four CRUD endpoints.
#[async_trait]
pub trait CrudResource: Send + Sync {
    type Record: Clone + Send + Sync;
    type Payload: Validate + Send + Sync;

    /// Singular noun used in prompts, e.g. `"user"`.
    const NOUN: &'static str;

    fn id(record: &Self::Record) -> DbId;

    async fn list(&self, client: &ApiClient) -> Result<Vec<Self::Record>, ApiError>;
    async fn create(&self, client: &ApiClient, payload: &Self::Payload) -> Result<(), ApiError>;
    async fn update(
        &self,
        client: &ApiClient,
        id: DbId,
        payload: &Self::Payload,
    ) -> Result<(), ApiError>;
    async fn delete(&self, client: &ApiClient, id: DbId) -> Result<(), ApiError>;
}

pub struct Customers;

#[async_trait]
impl CrudResource for Customers {
    type Record = Customer;
    type Payload = CustomerPayload;
    const NOUN: &'static str = "customer";

    fn id(record: &Customer) -> DbId {
        record.customer_id
    }

    async fn list(&self, client: &ApiClient) -> Result<Vec<Customer>, ApiError> {
        client.list_customers().await
    }

    async fn create(&self, client: &ApiClient, payload: &CustomerPayload) -> Result<(), ApiError> {
        client.create_customer(payload).await
    }

    async fn update(
        &self,
        client: &ApiClient,
        id: DbId,
        payload: &CustomerPayload,
    ) -> Result<(), ApiError> {
        client.update_customer(id, payload).await
    }

    async fn delete(&self, client: &ApiClient, id: DbId) -> Result<(), ApiError> {
        client.delete_customer(id).await
    }
}

pub struct Users;

#[async_trait]
impl CrudResource for Users {
    type Record = User;
    type Payload = UserPayload;
    const NOUN: &'static str = "user";

    fn id(record: &User) -> DbId {
        record.user_id
    }

    async fn list(&self, client: &ApiClient) -> Result<Vec<User>, ApiError> {
        client.list_users().await
    }

    async fn create(&self, client: &ApiClient, payload: &UserPayload) -> Result<(), ApiError> {
        client.create_user(payload).await
    }

    async fn update(
        &self,
        client: &ApiClient,
        id: DbId,
        payload: &UserPayload,
    ) -> Result<(), ApiError> {
        client.update_user(id, payload).await
    }

    async fn delete(&self, client: &ApiClient, id: DbId) -> Result<(), ApiError> {
        client.delete_user(id).await
    }
}

pub struct Roles;

#[async_trait]
impl CrudResource for Roles {
    type Record = RoleRecord;
    type Payload = RolePayload;
    const NOUN: &'static str = "role";

    fn id(record: &RoleRecord) -> DbId {
        record.role_id
    }

    async fn list(&self, client: &ApiClient) -> Result<Vec<RoleRecord>, ApiError> {
        client.list_roles().await
    }

    async fn create(&self, client: &ApiClient, payload: &RolePayload) -> Result<(), ApiError> {
        client.create_role(payload).await
    }

    async fn update(
        &self,
        client: &ApiClient,
        id: DbId,
        payload: &RolePayload,
    ) -> Result<(), ApiError> {
        client.update_role(id, payload).await
    }

    async fn delete(&self, client: &ApiClient, id: DbId) -> Result<(), ApiError> {
        client.delete_role(id).await
    }
}

/// Operation statuses of one screen.
#[derive(Debug)]
pub struct CrudState<T> {
    pub list: OpStatus<Vec<T>, ApiError>,
    pub create: OpStatus<(), ApiError>,
    pub update: OpStatus<(), ApiError>,
    pub delete: OpStatus<(), ApiError>,
}

impl<T> Default for CrudState<T> {
    fn default() -> Self {
        Self {
            list: OpStatus::Idle,
            create: OpStatus::Idle,
            update: OpStatus::Idle,
            delete: OpStatus::Idle,
        }
    }
}

pub struct CrudScreen<R: CrudResource> {
    resource: R,
    client: Arc<ApiClient>,
    confirmer: Arc<dyn Confirmer>,
    state: Mutex<CrudState<R::Record>>,
}

impl<R: CrudResource> CrudScreen<R> {
    pub fn new(resource: R, client: Arc<ApiClient>, confirmer: Arc<dyn Confirmer>) -> Self {
        Self {
            resource,
            client,
            confirmer,
            state: Mutex::new(CrudState::default()),
        }
    }

    pub fn with_state<T>(&self, f: impl FnOnce(&CrudState<R::Record>) -> T) -> T {
        f(&self.state.lock().unwrap_or_else(|e| e.into_inner()))
    }

    fn update_state(&self, f: impl FnOnce(&mut CrudState<R::Record>)) {
        f(&mut self.state.lock().unwrap_or_else(|e| e.into_inner()));
    }

    pub fn records(&self) -> Vec<R::Record> {
        self.with_state(|s| s.list.value().cloned().unwrap_or_default())
    }

    pub fn find(&self, id: DbId) -> Option<R::Record> {
        self.records().into_iter().find(|r| R::id(r) == id)
    }

    pub async fn load(&self) -> Result<Vec<R::Record>, ApiError> {
        self.update_state(|s| s.list = OpStatus::Pending);
        let result = self.resource.list(&self.client).await;
        self.update_state(|s| s.list.settle(result.clone()));
        result
    }

    pub async fn create(&self, payload: &R::Payload) -> Result<(), ApiError> {
        self.update_state(|s| s.create = OpStatus::Pending);
        let result = match local_validation(payload) {
            Ok(()) => self.resource.create(&self.client, payload).await,
            Err(e) => Err(e),
        };
        self.settle_mutation(result, |s| &mut s.create, "create").await
    }

    pub async fn update(&self, id: DbId, payload: &R::Payload) -> Result<(), ApiError> {
        self.update_state(|s| s.update = OpStatus::Pending);
        let result = match local_validation(payload) {
            Ok(()) => self.resource.update(&self.client, id, payload).await,
            Err(e) => Err(e),
        };
        self.settle_mutation(result, |s| &mut s.update, "update").await
    }

    /// Delete after confirmation. Declining sends no request.
    pub async fn delete(&self, id: DbId) -> Result<Outcome, ApiError> {
        let prompt = format!("Are you sure you want to delete this {}?", R::NOUN);
        if !self.confirmer.confirm(&prompt) {
            tracing::info!(resource = R::NOUN, id, "Delete cancelled");
            return Ok(Outcome::Cancelled);
        }

        self.update_state(|s| s.delete = OpStatus::Pending);
        let result = self.resource.delete(&self.client, id).await;
        self.settle_mutation(result, |s| &mut s.delete, "delete")
            .await
            .map(|()| Outcome::Applied)
    }

    /// Record a mutation's outcome and reload the list after a success.
    async fn settle_mutation(
        &self,
        result: Result<(), ApiError>,
        slot: fn(&mut CrudState<R::Record>) -> &mut OpStatus<(), ApiError>,
        verb: &'static str,
    ) -> Result<(), ApiError> {
        self.update_state(|s| slot(s).settle(result.clone()));
        match &result {
            Ok(()) => {
                tracing::info!(resource = R::NOUN, verb, "Mutation applied");
                if let Err(e) = self.load().await {
                    tracing::warn!(resource = R::NOUN, error = %e, "Reload after mutation failed");
                }
            }
            Err(e) => tracing::warn!(resource = R::NOUN, verb, error = %e, "Mutation failed"),
        }
        result
    }
}

fn local_validation<P: Validate>(payload: &P) -> Result<(), ApiError> {
    validate_payload(payload).map_err(|e| ApiError::Invalid(e.to_string()))
}
