//! Role entity model and write DTO.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{null_as_empty, DbId};

/// A role row as returned by `GET /Roles`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRecord {
    #[serde(rename = "roleId")]
    pub role_id: DbId,
    #[serde(rename = "roleName", default, deserialize_with = "null_as_empty")]
    pub role_name: String,
    #[serde(rename = "isActive", default)]
    pub is_active: bool,
}

/// Body of `POST /Roles` and `PUT /Roles/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct RolePayload {
    #[serde(rename = "roleName")]
    #[validate(length(min = 1, message = "Role name is required"))]
    pub role_name: String,
    #[serde(rename = "isActive")]
    pub is_active: bool,
}
