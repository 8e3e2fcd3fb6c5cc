//! Project record, its display-only enrichment, and the write payload.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::status::ProjectStatus;
use crate::types::{null_as_empty, DbId, ResourceId, Timestamp};

/// A project as returned by `GET /Projects`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "projectInternalID")]
    pub project_internal_id: ResourceId,
    #[serde(rename = "coreProjectID", default)]
    pub core_project_id: Option<ResourceId>,
    #[serde(rename = "projectName", default, deserialize_with = "null_as_empty")]
    pub project_name: String,
    #[serde(
        rename = "projectAbbreviation",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub project_abbreviation: String,
    #[serde(rename = "customerID", default)]
    pub customer_id: Option<DbId>,
    #[serde(default)]
    pub buid: Option<DbId>,
    #[serde(rename = "billingTypeID", default)]
    pub billing_type_id: Option<DbId>,
    #[serde(rename = "segmentID", default)]
    pub segment_id: Option<DbId>,
    #[serde(rename = "projectLocationCity", default)]
    pub project_location_city: Option<String>,
    #[serde(rename = "customerAddress", default)]
    pub customer_address: Option<String>,
    #[serde(
        rename = "projectStartDate",
        default,
        with = "crate::types::lenient_timestamp"
    )]
    pub project_start_date: Option<Timestamp>,
    #[serde(
        rename = "projectEndDate",
        default,
        with = "crate::types::lenient_timestamp"
    )]
    pub project_end_date: Option<Timestamp>,
    #[serde(rename = "resourceRequirement", default)]
    pub resource_requirement: Option<String>,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(
        rename = "createdDate",
        default,
        with = "crate::types::lenient_timestamp"
    )]
    pub created_date: Option<Timestamp>,
    /// Generated project identifier, once the backend has assigned one.
    #[serde(default, alias = "projectPID", alias = "generatedPID")]
    pub pid: Option<String>,
    #[serde(rename = "adminRemarks", default)]
    pub admin_remarks: Option<String>,
    #[serde(rename = "superAdminRemarks", default)]
    pub super_admin_remarks: Option<String>,
    #[serde(rename = "createdByUserName", default)]
    pub created_by_user_name: Option<String>,
    /// Display-only names joined from reference data. Never serialized.
    #[serde(skip)]
    pub enrichment: Enrichment,
}

/// Denormalized reference names attached to a [`Project`] for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enrichment {
    pub customer_name: String,
    pub customer_abbreviation: String,
    pub customer_code: String,
    pub bu_name: String,
    pub bu_code: String,
    pub billing_type_name: String,
    pub billing_type_code: String,
    pub segment_name: String,
}

/// A foreign key as entered in the project form.
///
/// The form accepts either free text (typed into an input) or an option
/// picked from a reference list. Both are coerced to an integer by
/// [`crate::payload::normalize_project`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ForeignKeyInput {
    #[default]
    Empty,
    Typed(String),
    Selected(DbId),
}

impl From<DbId> for ForeignKeyInput {
    fn from(value: DbId) -> Self {
        ForeignKeyInput::Selected(value)
    }
}

impl From<&str> for ForeignKeyInput {
    fn from(value: &str) -> Self {
        ForeignKeyInput::Typed(value.to_string())
    }
}

/// Editable project form state, for both create and edit mode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectForm {
    /// Present in edit mode only.
    pub project_internal_id: Option<ResourceId>,
    pub project_name: String,
    pub project_abbreviation: String,
    pub customer_id: ForeignKeyInput,
    pub buid: ForeignKeyInput,
    pub billing_type_id: ForeignKeyInput,
    pub segment_id: ForeignKeyInput,
    pub project_location_city: String,
    pub customer_address: String,
    pub project_start_date: Option<NaiveDate>,
    pub project_end_date: Option<NaiveDate>,
    pub resource_requirement: String,
}

impl ProjectForm {
    /// Pre-fill an edit form from an existing project. Dates are truncated
    /// to the calendar day.
    pub fn from_project(project: &Project) -> Self {
        Self {
            project_internal_id: Some(project.project_internal_id.clone()),
            project_name: project.project_name.clone(),
            project_abbreviation: project.project_abbreviation.clone(),
            customer_id: project.customer_id.map(Into::into).unwrap_or_default(),
            buid: project.buid.map(Into::into).unwrap_or_default(),
            billing_type_id: project.billing_type_id.map(Into::into).unwrap_or_default(),
            segment_id: project.segment_id.map(Into::into).unwrap_or_default(),
            project_location_city: project.project_location_city.clone().unwrap_or_default(),
            customer_address: project.customer_address.clone().unwrap_or_default(),
            project_start_date: project.project_start_date.map(|ts| ts.date_naive()),
            project_end_date: project.project_end_date.map(|ts| ts.date_naive()),
            resource_requirement: project.resource_requirement.clone().unwrap_or_default(),
        }
    }
}

/// Body of `POST /Projects` and `PUT /Projects/{id}`.
///
/// Built only through [`crate::payload::normalize_project`], so the four
/// foreign keys are always integers.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct ProjectPayload {
    #[serde(rename = "projectInternalID", skip_serializing_if = "Option::is_none")]
    pub project_internal_id: Option<ResourceId>,
    #[serde(rename = "projectName")]
    #[validate(length(min = 1, message = "Project name is required"))]
    pub project_name: String,
    #[serde(rename = "projectAbbreviation")]
    #[validate(length(min = 1, max = 4, message = "Abbreviation must be 1 to 4 characters"))]
    pub project_abbreviation: String,
    #[serde(rename = "customerID")]
    pub customer_id: DbId,
    pub buid: DbId,
    #[serde(rename = "billingTypeID")]
    pub billing_type_id: DbId,
    #[serde(rename = "segmentID")]
    pub segment_id: DbId,
    #[serde(rename = "projectLocationCity")]
    #[validate(length(min = 1, message = "City is required"))]
    pub project_location_city: String,
    #[serde(rename = "customerAddress")]
    pub customer_address: String,
    #[serde(rename = "projectStartDate")]
    pub project_start_date: NaiveDate,
    #[serde(rename = "projectEndDate")]
    pub project_end_date: NaiveDate,
    #[serde(rename = "resourceRequirement")]
    pub resource_requirement: String,
}

/// Body of the approve/reject endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemarksRequest {
    pub remarks: String,
}
