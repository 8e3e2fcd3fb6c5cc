//! Project form → write payload normalization.
//!
//! Shared by the create and update paths so the foreign-key coercion lives in
//! exactly one place.

use validator::Validate;

use crate::error::CoreError;
use crate::models::project::{ForeignKeyInput, ProjectForm, ProjectPayload};
use crate::types::DbId;

/// Coerce one foreign key to an integer.
///
/// Selected options are already numeric; typed text is trimmed and parsed.
/// Empty or non-numeric input is a validation error.
pub fn coerce_foreign_key(field: &str, input: &ForeignKeyInput) -> Result<DbId, CoreError> {
    match input {
        ForeignKeyInput::Selected(id) => Ok(*id),
        ForeignKeyInput::Typed(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Err(CoreError::Validation(format!("{field} is required")));
            }
            trimmed.parse::<DbId>().map_err(|_| {
                CoreError::Validation(format!("{field} must be a number, got '{trimmed}'"))
            })
        }
        ForeignKeyInput::Empty => Err(CoreError::Validation(format!("{field} is required"))),
    }
}

/// Build the create/update payload from a project form.
///
/// The four foreign keys become integers, the internal ID is carried only in
/// edit mode, and the required-field rules of the form are enforced.
pub fn normalize_project(form: &ProjectForm) -> Result<ProjectPayload, CoreError> {
    let customer_id = coerce_foreign_key("customerID", &form.customer_id)?;
    let buid = coerce_foreign_key("buid", &form.buid)?;
    let billing_type_id = coerce_foreign_key("billingTypeID", &form.billing_type_id)?;
    let segment_id = coerce_foreign_key("segmentID", &form.segment_id)?;

    let project_start_date = form
        .project_start_date
        .ok_or_else(|| CoreError::Validation("projectStartDate is required".to_string()))?;
    let project_end_date = form
        .project_end_date
        .ok_or_else(|| CoreError::Validation("projectEndDate is required".to_string()))?;

    let payload = ProjectPayload {
        project_internal_id: form.project_internal_id.clone(),
        project_name: form.project_name.clone(),
        project_abbreviation: form.project_abbreviation.clone(),
        customer_id,
        buid,
        billing_type_id,
        segment_id,
        project_location_city: form.project_location_city.clone(),
        customer_address: form.customer_address.clone(),
        project_start_date,
        project_end_date,
        resource_requirement: form.resource_requirement.clone(),
    };

    validate_payload(&payload)?;
    Ok(payload)
}

/// Run a payload's `validator` rules, mapping failures to
/// [`CoreError::Validation`].
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), CoreError> {
    payload
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))
}
