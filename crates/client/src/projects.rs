//! Project endpoints: CRUD plus the review workflow.

use pidgen_core::lifecycle::ProjectAction;
use pidgen_core::models::project::{Project, ProjectPayload, RemarksRequest};
use pidgen_core::types::ResourceId;
use reqwest::Method;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::routes;

impl ApiClient {
    /// `GET /Projects`, raw and unenriched.
    pub async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.get_list(routes::PROJECTS).await
    }

    pub async fn create_project(&self, payload: &ProjectPayload) -> Result<(), ApiError> {
        self.send_unit(Method::POST, routes::PROJECTS, Some(payload))
            .await
    }

    pub async fn update_project(
        &self,
        id: &ResourceId,
        payload: &ProjectPayload,
    ) -> Result<(), ApiError> {
        self.send_unit(Method::PUT, &routes::project(id), Some(payload))
            .await
    }

    pub async fn delete_project(&self, id: &ResourceId) -> Result<(), ApiError> {
        self.send_unit::<()>(Method::DELETE, &routes::project(id), None)
            .await
    }

    pub async fn generate_pid(&self, id: &ResourceId) -> Result<(), ApiError> {
        self.workflow(id, ProjectAction::GeneratePid, None).await
    }

    pub async fn submit_for_admin_review(&self, id: &ResourceId) -> Result<(), ApiError> {
        self.workflow(id, ProjectAction::SubmitForAdminReview, None)
            .await
    }

    pub async fn admin_approve(&self, id: &ResourceId, remarks: &str) -> Result<(), ApiError> {
        self.workflow(id, ProjectAction::AdminApprove, Some(remarks))
            .await
    }

    pub async fn admin_reject(&self, id: &ResourceId, remarks: &str) -> Result<(), ApiError> {
        self.workflow(id, ProjectAction::AdminReject, Some(remarks))
            .await
    }

    pub async fn submit_for_superadmin_review(&self, id: &ResourceId) -> Result<(), ApiError> {
        self.workflow(id, ProjectAction::SubmitForSuperAdminReview, None)
            .await
    }

    pub async fn superadmin_approve(&self, id: &ResourceId, remarks: &str) -> Result<(), ApiError> {
        self.workflow(id, ProjectAction::SuperAdminApprove, Some(remarks))
            .await
    }

    pub async fn superadmin_reject(&self, id: &ResourceId, remarks: &str) -> Result<(), ApiError> {
        self.workflow(id, ProjectAction::SuperAdminReject, Some(remarks))
            .await
    }

    /// `POST /Projects/{id}/<action>`, with `{"remarks": ...}` for decisions.
    async fn workflow(
        &self,
        id: &ResourceId,
        action: ProjectAction,
        remarks: Option<&str>,
    ) -> Result<(), ApiError> {
        let path = routes::project_action(id, action).ok_or_else(|| {
            ApiError::Invalid(format!("'{action}' is not a workflow action"))
        })?;
        let body = remarks.map(|r| RemarksRequest {
            remarks: r.to_string(),
        });
        self.send_unit(Method::POST, &path, body.as_ref()).await?;
        tracing::info!(project_id = %id, %action, "Workflow action accepted");
        Ok(())
    }
}
