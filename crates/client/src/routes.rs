//! Backend endpoint paths, relative to the configured base URL.

use pidgen_core::lifecycle::ProjectAction;
use pidgen_core::types::{DbId, ResourceId};

pub const LOGIN: &str = "/Auth/login";
pub const PROJECTS: &str = "/Projects";
pub const CUSTOMERS: &str = "/Customers";
pub const BUSINESS_UNITS: &str = "/BusinessUnits";
pub const BILLING_TYPES: &str = "/BillingTypes";
pub const SEGMENTS: &str = "/Segments";
pub const USERS: &str = "/Users";
pub const ROLES: &str = "/Roles";

pub fn project(id: &ResourceId) -> String {
    format!("{PROJECTS}/{}", id.as_path_segment())
}

/// `POST /Projects/{id}/<action>` for the workflow actions. Create, update
/// and delete address the collection or the record itself and have no
/// sub-path.
pub fn project_action(id: &ResourceId, action: ProjectAction) -> Option<String> {
    match action {
        ProjectAction::Create | ProjectAction::Update | ProjectAction::Delete => None,
        _ => Some(format!("{}/{}", project(id), action.as_str())),
    }
}

pub fn customer(id: DbId) -> String {
    format!("{CUSTOMERS}/{id}")
}

pub fn user(id: DbId) -> String {
    format!("{USERS}/{id}")
}

pub fn role(id: DbId) -> String {
    format!("{ROLES}/{id}")
}
