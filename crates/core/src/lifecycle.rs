//! Client-side contract of the project workflow.
//!
//! The backend enforces the state machine. This module only answers which
//! actions a role may trigger, which identifier each endpoint is addressed
//! by, whether the user must confirm first, and what the client shows
//! afterwards. Status is never consulted for gating.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::models::project::Project;
use crate::roles::Role;
use crate::status::ProjectStatus;
use crate::types::ResourceId;

/// Remark sent with an admin approval.
pub const ADMIN_APPROVE_REMARK: &str = "Approved by admin";
/// Remark sent with an admin rejection.
pub const ADMIN_REJECT_REMARK: &str = "Rejected by admin";
/// Default remark offered for a superadmin approval.
pub const SUPERADMIN_APPROVE_REMARK: &str = "Approved by superadmin";
/// Default remark offered for a superadmin rejection.
pub const SUPERADMIN_REJECT_REMARK: &str = "Rejected by superadmin";

/// Every operation the lifecycle controller can dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectAction {
    Create,
    Update,
    GeneratePid,
    SubmitForAdminReview,
    AdminApprove,
    AdminReject,
    SubmitForSuperAdminReview,
    SuperAdminApprove,
    SuperAdminReject,
    Delete,
}

impl ProjectAction {
    pub const ALL: [ProjectAction; 10] = [
        ProjectAction::Create,
        ProjectAction::Update,
        ProjectAction::GeneratePid,
        ProjectAction::SubmitForAdminReview,
        ProjectAction::AdminApprove,
        ProjectAction::AdminReject,
        ProjectAction::SubmitForSuperAdminReview,
        ProjectAction::SuperAdminApprove,
        ProjectAction::SuperAdminReject,
        ProjectAction::Delete,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectAction::Create => "create",
            ProjectAction::Update => "update",
            ProjectAction::GeneratePid => "generate-pid",
            ProjectAction::SubmitForAdminReview => "submit-for-admin-review",
            ProjectAction::AdminApprove => "admin-approve",
            ProjectAction::AdminReject => "admin-reject",
            ProjectAction::SubmitForSuperAdminReview => "submit-for-superadmin-review",
            ProjectAction::SuperAdminApprove => "superadmin-approve",
            ProjectAction::SuperAdminReject => "superadmin-reject",
            ProjectAction::Delete => "delete",
        }
    }

    /// Whether `role` may trigger this action.
    pub fn is_permitted(self, role: &Role) -> bool {
        match self {
            ProjectAction::Create | ProjectAction::Delete => role.is_administrative(),
            ProjectAction::AdminApprove | ProjectAction::AdminReject => *role == Role::Admin,
            ProjectAction::SuperAdminApprove | ProjectAction::SuperAdminReject => {
                *role == Role::SuperAdmin
            }
            ProjectAction::Update
            | ProjectAction::GeneratePid
            | ProjectAction::SubmitForAdminReview
            | ProjectAction::SubmitForSuperAdminReview => true,
        }
    }

    /// Fail with [`CoreError::Forbidden`] unless `role` may trigger this action.
    pub fn authorize(self, role: &Role) -> Result<(), CoreError> {
        if self.is_permitted(role) {
            Ok(())
        } else {
            Err(CoreError::Forbidden(format!(
                "Role '{role}' may not {}",
                self.as_str()
            )))
        }
    }

    /// Destructive and decision actions need an explicit yes from the user.
    pub fn requires_confirmation(self) -> bool {
        matches!(
            self,
            ProjectAction::Delete
                | ProjectAction::AdminApprove
                | ProjectAction::AdminReject
                | ProjectAction::SuperAdminApprove
                | ProjectAction::SuperAdminReject
        )
    }

    /// Superadmin decisions collect a free-text remark from the user.
    pub fn collects_remarks(self) -> bool {
        matches!(
            self,
            ProjectAction::SuperAdminApprove | ProjectAction::SuperAdminReject
        )
    }

    /// Remark sent (admin) or pre-filled (superadmin) with a decision.
    pub fn default_remark(self) -> Option<&'static str> {
        match self {
            ProjectAction::AdminApprove => Some(ADMIN_APPROVE_REMARK),
            ProjectAction::AdminReject => Some(ADMIN_REJECT_REMARK),
            ProjectAction::SuperAdminApprove => Some(SUPERADMIN_APPROVE_REMARK),
            ProjectAction::SuperAdminReject => Some(SUPERADMIN_REJECT_REMARK),
            _ => None,
        }
    }

    /// Notice shown after the action succeeds, if any.
    pub fn success_notice(self) -> Option<&'static str> {
        match self {
            ProjectAction::Create => Some("Project created successfully."),
            ProjectAction::GeneratePid => Some("PID generated successfully."),
            ProjectAction::AdminApprove => Some("Project approved by admin."),
            ProjectAction::AdminReject => Some("Project rejected by admin."),
            ProjectAction::SuperAdminApprove => Some("Project approved by superadmin."),
            ProjectAction::SuperAdminReject => Some("Project rejected by superadmin."),
            _ => None,
        }
    }

    /// Status the backend is expected to report afterwards. Informational
    /// only; the reloaded list is authoritative.
    pub fn implied_status(self) -> Option<ProjectStatus> {
        match self {
            ProjectAction::Create => Some(ProjectStatus::Draft),
            ProjectAction::SubmitForAdminReview => Some(ProjectStatus::PendingAdminReview),
            ProjectAction::AdminApprove => Some(ProjectStatus::AdminApproved),
            ProjectAction::AdminReject => Some(ProjectStatus::AdminRejected),
            ProjectAction::SubmitForSuperAdminReview => {
                Some(ProjectStatus::PendingSuperAdminReview)
            }
            ProjectAction::SuperAdminApprove => Some(ProjectStatus::SuperAdminApproved),
            ProjectAction::SuperAdminReject => Some(ProjectStatus::SuperAdminRejected),
            ProjectAction::Update | ProjectAction::GeneratePid | ProjectAction::Delete => None,
        }
    }
}

impl fmt::Display for ProjectAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Actions `role` may trigger on an existing project, in display order.
pub fn available_actions(role: &Role) -> Vec<ProjectAction> {
    ProjectAction::ALL
        .into_iter()
        .filter(|a| *a != ProjectAction::Create && a.is_permitted(role))
        .collect()
}

/// Which of a project's two identifiers an endpoint is addressed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    Internal,
    Core,
}

/// How workflow endpoints pick between `projectInternalID` and
/// `coreProjectID`.
///
/// `Observed` reproduces the mix the deployed backend has been exercised
/// with: admin-reject and delete by internal ID, everything else by core ID.
/// `Core` addresses every workflow endpoint by core ID; delete stays on the
/// internal ID because that is the list key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdPolicy {
    #[default]
    Observed,
    Core,
}

impl IdPolicy {
    pub fn id_kind(self, action: ProjectAction) -> IdKind {
        match (self, action) {
            (_, ProjectAction::Delete) => IdKind::Internal,
            (IdPolicy::Observed, ProjectAction::AdminReject) => IdKind::Internal,
            _ => IdKind::Core,
        }
    }

    /// Resolve the identifier to put in the endpoint path.
    pub fn target_id(
        self,
        action: ProjectAction,
        project: &Project,
    ) -> Result<ResourceId, CoreError> {
        match self.id_kind(action) {
            IdKind::Internal => Ok(project.project_internal_id.clone()),
            IdKind::Core => project.core_project_id.clone().ok_or_else(|| {
                CoreError::Validation(format!(
                    "Project {} has no coreProjectID; cannot {action}",
                    project.project_internal_id
                ))
            }),
        }
    }
}

impl FromStr for IdPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "observed" => Ok(IdPolicy::Observed),
            "core" => Ok(IdPolicy::Core),
            other => Err(format!(
                "Invalid id policy '{other}'. Must be one of: observed, core"
            )),
        }
    }
}
