//! Project lifecycle controller.
//!
//! Owns the displayed project list and dispatches create, update, workflow
//! and delete actions. Every action is gated by the session role, guarded by
//! a per-project busy flag, confirmed when destructive, and followed by a
//! full reload of the list from the server.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use pidgen_client::{ApiClient, ApiError};
use pidgen_core::enrichment::{enrich, ReferenceData};
use pidgen_core::error::CoreError;
use pidgen_core::lifecycle::ProjectAction;
use pidgen_core::listing::{dedupe_by_internal_id, sort_newest_first, ProjectQuery};
use pidgen_core::models::project::{Project, ProjectForm};
use pidgen_core::operation::OpStatus;
use pidgen_core::payload::normalize_project;
use pidgen_core::roles::Role;
use pidgen_core::types::ResourceId;

use crate::confirm::Confirmer;

/// Why an action did not apply.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ActionError {
    #[error("Project {0} already has an action in progress")]
    Busy(ResourceId),

    #[error("Not signed in. Run `pidgen login` first")]
    NotSignedIn,

    /// Rejected locally: role gating or form validation.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Result of an action that passed the local checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// The user declined the confirmation or remarks prompt.
    Cancelled,
}

/// Everything the project screen shows.
#[derive(Debug, Default)]
pub struct ProjectsState {
    /// Enriched, deduplicated, newest first.
    pub list: OpStatus<Vec<Project>, ApiError>,
    pub reference: ReferenceData,
    pub notice: Option<String>,
    pub error: Option<ActionError>,
}

pub struct ProjectsController {
    client: Arc<ApiClient>,
    confirmer: Arc<dyn Confirmer>,
    busy: Mutex<HashSet<ResourceId>>,
    state: Mutex<ProjectsState>,
}

/// Releases a project's busy flag when dropped.
struct BusyGuard<'a> {
    set: &'a Mutex<HashSet<ResourceId>>,
    id: ResourceId,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.set
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&self.id);
    }
}

impl ProjectsController {
    pub fn new(client: Arc<ApiClient>, confirmer: Arc<dyn Confirmer>) -> Self {
        Self {
            client,
            confirmer,
            busy: Mutex::new(HashSet::new()),
            state: Mutex::new(ProjectsState::default()),
        }
    }

    /// Run `f` against the current state.
    pub fn with_state<T>(&self, f: impl FnOnce(&ProjectsState) -> T) -> T {
        f(&self.state.lock().unwrap_or_else(|e| e.into_inner()))
    }

    /// The displayed list. Empty until the first successful reload.
    pub fn projects(&self) -> Vec<Project> {
        self.with_state(|s| s.list.value().cloned().unwrap_or_default())
    }

    /// The displayed list passed through the filter panel.
    pub fn filtered(&self, query: &ProjectQuery) -> Vec<Project> {
        query.apply(&self.projects())
    }

    pub fn find(&self, id: &ResourceId) -> Option<Project> {
        self.with_state(|s| {
            s.list.value().and_then(|list| {
                list.iter()
                    .find(|p| same_id(&p.project_internal_id, id))
                    .cloned()
            })
        })
    }

    pub fn is_busy(&self, id: &ResourceId) -> bool {
        self.busy
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(id)
    }

    pub fn notice(&self) -> Option<String> {
        self.with_state(|s| s.notice.clone())
    }

    pub fn last_error(&self) -> Option<ActionError> {
        self.with_state(|s| s.error.clone())
    }

    fn update_state(&self, f: impl FnOnce(&mut ProjectsState)) {
        f(&mut self.state.lock().unwrap_or_else(|e| e.into_inner()));
    }

    fn try_acquire(&self, id: &ResourceId) -> Option<BusyGuard<'_>> {
        let mut set = self.busy.lock().unwrap_or_else(|e| e.into_inner());
        if !set.insert(id.clone()) {
            return None;
        }
        Some(BusyGuard {
            set: &self.busy,
            id: id.clone(),
        })
    }

    fn role(&self) -> Result<Role, ActionError> {
        self.client
            .session()
            .map(|s| s.role())
            .ok_or(ActionError::NotSignedIn)
    }

    // ---- loading ----

    /// Fetch the four reference lists concurrently and re-enrich the
    /// current list.
    pub async fn load_reference(&self) -> Result<(), ActionError> {
        let reference = self.client.load_reference_data().await?;
        self.update_state(|s| {
            if let Some(list) = s.list.value() {
                if let Some(enriched) = enrich(list, &reference) {
                    s.list = OpStatus::Succeeded(enriched);
                }
            }
            s.reference = reference;
        });
        Ok(())
    }

    /// Reload the list from the server, then dedupe, enrich and sort it
    /// newest first.
    pub async fn reload(&self) -> Result<Vec<Project>, ActionError> {
        self.update_state(|s| s.list = OpStatus::Pending);
        let reference = self.with_state(|s| s.reference.clone());

        let result = self.client.list_projects().await.map(|raw| {
            let raw = dedupe_by_internal_id(raw);
            let mut list = enrich(&raw, &reference).unwrap_or(raw);
            sort_newest_first(&mut list);
            list
        });
        self.update_state(|s| s.list.settle(result.clone()));

        let list = result?;
        tracing::debug!(count = list.len(), "Projects reloaded");
        Ok(list)
    }

    // ---- actions ----

    /// Create a project from `form`. Requires an administrative role.
    pub async fn create(&self, form: &ProjectForm) -> Result<Outcome, ActionError> {
        self.begin();
        let result = self.create_inner(form).await;
        self.finish(ProjectAction::Create, None, result).await
    }

    async fn create_inner(&self, form: &ProjectForm) -> Result<Outcome, ActionError> {
        ProjectAction::Create.authorize(&self.role()?)?;
        let mut form = form.clone();
        form.project_internal_id = None;
        let payload = normalize_project(&form)?;
        self.client.create_project(&payload).await?;
        Ok(Outcome::Applied)
    }

    /// Update an existing project's descriptive fields.
    pub async fn update(
        &self,
        project: &Project,
        form: &ProjectForm,
    ) -> Result<Outcome, ActionError> {
        self.begin();
        let id = project.project_internal_id.clone();
        let result = self.update_inner(project, form).await;
        self.finish(ProjectAction::Update, Some(&id), result).await
    }

    async fn update_inner(
        &self,
        project: &Project,
        form: &ProjectForm,
    ) -> Result<Outcome, ActionError> {
        ProjectAction::Update.authorize(&self.role()?)?;
        let target = self
            .client
            .id_policy()
            .target_id(ProjectAction::Update, project)?;
        let _guard = self
            .try_acquire(&project.project_internal_id)
            .ok_or_else(|| ActionError::Busy(project.project_internal_id.clone()))?;

        let mut form = form.clone();
        form.project_internal_id = Some(project.project_internal_id.clone());
        let payload = normalize_project(&form)?;
        self.client.update_project(&target, &payload).await?;
        Ok(Outcome::Applied)
    }

    /// Run a workflow action or delete on `project`.
    ///
    /// Fails without a request when the role may not perform `action` or the
    /// project is already busy. Decisions and delete ask for confirmation;
    /// superadmin decisions also collect a remark.
    pub async fn dispatch(
        &self,
        action: ProjectAction,
        project: &Project,
    ) -> Result<Outcome, ActionError> {
        self.begin();
        let id = project.project_internal_id.clone();
        let result = self.dispatch_inner(action, project).await;
        self.finish(action, Some(&id), result).await
    }

    async fn dispatch_inner(
        &self,
        action: ProjectAction,
        project: &Project,
    ) -> Result<Outcome, ActionError> {
        if matches!(action, ProjectAction::Create | ProjectAction::Update) {
            return Err(needs_form(action));
        }
        action.authorize(&self.role()?)?;
        let target = self.client.id_policy().target_id(action, project)?;
        let _guard = self
            .try_acquire(&project.project_internal_id)
            .ok_or_else(|| ActionError::Busy(project.project_internal_id.clone()))?;

        let name = &project.project_name;
        if action.requires_confirmation() {
            let prompt = match action {
                ProjectAction::Delete => {
                    format!("Are you sure you want to delete project '{name}'?")
                }
                _ => format!("{} project '{name}'?", capitalize(action.as_str())),
            };
            if !self.confirmer.confirm(&prompt) {
                return Ok(Outcome::Cancelled);
            }
        }

        let remarks = match (action.collects_remarks(), action.default_remark()) {
            (true, Some(default)) => match self.confirmer.collect_remarks("Remarks", default) {
                Some(remarks) => Some(remarks),
                None => return Ok(Outcome::Cancelled),
            },
            (_, default) => default.map(str::to_string),
        };
        let remarks = remarks.unwrap_or_default();

        tracing::info!(
            project_id = %project.project_internal_id,
            target_id = %target,
            %action,
            "Dispatching project action"
        );
        let client = &self.client;
        match action {
            ProjectAction::GeneratePid => client.generate_pid(&target).await?,
            ProjectAction::SubmitForAdminReview => {
                client.submit_for_admin_review(&target).await?
            }
            ProjectAction::AdminApprove => client.admin_approve(&target, &remarks).await?,
            ProjectAction::AdminReject => client.admin_reject(&target, &remarks).await?,
            ProjectAction::SubmitForSuperAdminReview => {
                client.submit_for_superadmin_review(&target).await?
            }
            ProjectAction::SuperAdminApprove => {
                client.superadmin_approve(&target, &remarks).await?
            }
            ProjectAction::SuperAdminReject => {
                client.superadmin_reject(&target, &remarks).await?
            }
            ProjectAction::Delete => client.delete_project(&target).await?,
            ProjectAction::Create | ProjectAction::Update => return Err(needs_form(action)),
        }
        Ok(Outcome::Applied)
    }

    fn begin(&self) {
        self.update_state(|s| {
            s.notice = None;
            s.error = None;
        });
    }

    /// Record the outcome and reload after a success.
    async fn finish(
        &self,
        action: ProjectAction,
        id: Option<&ResourceId>,
        result: Result<Outcome, ActionError>,
    ) -> Result<Outcome, ActionError> {
        match result {
            Ok(Outcome::Applied) => {
                // A refused concurrent dispatch may have left its error behind.
                self.update_state(|s| {
                    s.error = None;
                    s.notice = action.success_notice().map(str::to_string);
                });
                // The action is applied even if the reload fails; the reload
                // error lands in the list status.
                match self.reload().await {
                    Ok(list) => note_status_drift(action, id, &list),
                    Err(e) => tracing::warn!(%action, error = %e, "Reload after action failed"),
                }
                Ok(Outcome::Applied)
            }
            Ok(Outcome::Cancelled) => {
                tracing::info!(%action, project_id = ?id, "Action cancelled");
                Ok(Outcome::Cancelled)
            }
            Err(e) => {
                match &e {
                    ActionError::Busy(_) => {
                        tracing::debug!(%action, project_id = ?id, "Project busy; dispatch refused")
                    }
                    _ => tracing::warn!(
                        %action,
                        project_id = ?id,
                        error = %e,
                        "Project action failed"
                    ),
                }
                self.update_state(|s| s.error = Some(e.clone()));
                Err(e)
            }
        }
    }
}

/// Log when the reloaded status is not the one `action` normally leads to.
/// The server's status is kept either way.
fn note_status_drift(action: ProjectAction, id: Option<&ResourceId>, list: &[Project]) {
    let (Some(id), Some(expected)) = (id, action.implied_status()) else {
        return;
    };
    if let Some(project) = list.iter().find(|p| same_id(&p.project_internal_id, id)) {
        if project.status != expected {
            tracing::info!(
                %action,
                project_id = %id,
                expected = %expected,
                reported = %project.status,
                "Server reported a different status than the action implies",
            );
        }
    }
}

/// `7` typed on a command line matches a project whose ID came back as the
/// string `"7"`.
fn same_id(a: &ResourceId, b: &ResourceId) -> bool {
    a == b || a.to_string() == b.to_string()
}

fn needs_form(action: ProjectAction) -> ActionError {
    CoreError::Validation(format!("'{action}' needs a project form")).into()
}

fn capitalize(action: &str) -> String {
    let words = action.replace('-', " ");
    let mut chars = words.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize_reads_as_a_question() {
        assert_eq!(capitalize("admin-approve"), "Admin approve");
        assert_eq!(capitalize("superadmin-reject"), "Superadmin reject");
    }
}
