//! Runs one parsed command against the backend and prints the result.

use std::sync::Arc;

use anyhow::{bail, Context};
use pidgen_client::ApiClient;
use pidgen_console::confirm::{Confirmer, TerminalConfirmer};
use pidgen_console::crud::{CrudResource, CrudScreen, Customers, Roles, Users};
use pidgen_console::projects::{ActionError, Outcome, ProjectsController};
use pidgen_console::render;
use pidgen_core::lifecycle::{available_actions, ProjectAction};
use pidgen_core::listing::ProjectQuery;
use pidgen_core::models::customer::CustomerPayload;
use pidgen_core::models::project::{ForeignKeyInput, Project, ProjectForm};
use pidgen_core::models::role::RolePayload;
use pidgen_core::models::user::UserPayload;
use pidgen_core::status::ProjectStatus;
use pidgen_core::types::ResourceId;

use crate::cli::{
    Command, CustomerCommand, CustomerFields, ProjectCommand, ProjectFields, ProjectFieldsUpdate,
    ProjectListArgs, ReferenceCommand, RoleCommand, UserCommand, UserFields,
};

pub async fn run(
    command: Command,
    client: Arc<ApiClient>,
    assume_yes: bool,
) -> anyhow::Result<()> {
    match command {
        Command::Login { username, password } => {
            let password = match password {
                Some(p) => p,
                None => rpassword::prompt_password("Password: ")
                    .context("Failed to read password")?,
            };
            let session = client.login(&username, &password).await?;
            println!(
                "Signed in as {} ({})",
                session.username().unwrap_or(&username),
                session.role()
            );
        }
        Command::Logout => {
            client.logout()?;
            println!("Signed out");
        }
        Command::Whoami => match client.session() {
            Some(session) => {
                let role = session.role();
                println!("{} ({role})", session.username().unwrap_or("unknown user"));
                let actions: Vec<&str> = available_actions(&role)
                    .into_iter()
                    .map(ProjectAction::as_str)
                    .collect();
                println!("Project actions: {}", actions.join(", "));
            }
            None => println!("Not signed in"),
        },
        Command::Projects(cmd) => run_projects(cmd, client, assume_yes).await?,
        Command::Customers(cmd) => run_customers(cmd, client, assume_yes).await?,
        Command::Users(cmd) => run_users(cmd, client, assume_yes).await?,
        Command::Roles(cmd) => run_roles(cmd, client, assume_yes).await?,
        Command::Reference(cmd) => match cmd {
            ReferenceCommand::BusinessUnits => {
                print!("{}", render::business_units(&client.list_business_units().await?))
            }
            ReferenceCommand::BillingTypes => {
                print!("{}", render::billing_types(&client.list_billing_types().await?))
            }
            ReferenceCommand::Segments => {
                print!("{}", render::segments(&client.list_segments().await?))
            }
        },
    }
    Ok(())
}

fn confirmer(assume_yes: bool, remarks: Option<String>) -> Arc<dyn Confirmer> {
    Arc::new(TerminalConfirmer::new(assume_yes, remarks))
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

async fn run_projects(
    cmd: ProjectCommand,
    client: Arc<ApiClient>,
    assume_yes: bool,
) -> anyhow::Result<()> {
    let remarks = match &cmd {
        ProjectCommand::SuperadminApprove { remarks, .. }
        | ProjectCommand::SuperadminReject { remarks, .. } => remarks.clone(),
        _ => None,
    };
    let controller = ProjectsController::new(client, confirmer(assume_yes, remarks));

    // Reference data first so the reloaded list comes back enriched.
    if let Err(e) = controller.load_reference().await {
        tracing::warn!(error = %e, "Reference data unavailable; showing raw projects");
    }
    controller.reload().await.map_err(report)?;

    match cmd {
        ProjectCommand::List(args) => {
            let query = list_query(&args);
            print!("{}", render::projects(&controller.filtered(&query)));
            return Ok(());
        }
        ProjectCommand::Show { id } => {
            let project = lookup(&controller, &id)?;
            print!("{}", render::project_detail(&project));
            return Ok(());
        }
        ProjectCommand::Create(fields) => {
            let outcome = controller.create(&create_form(fields)).await.map_err(report)?;
            print_outcome(&controller, outcome, "Project created");
        }
        ProjectCommand::Update { id, fields } => {
            let project = lookup(&controller, &id)?;
            let form = update_form(&project, fields);
            let outcome = controller.update(&project, &form).await.map_err(report)?;
            print_outcome(&controller, outcome, "Project updated");
        }
        ProjectCommand::GeneratePid { id } => {
            dispatch(&controller, ProjectAction::GeneratePid, &id).await?
        }
        ProjectCommand::SubmitAdmin { id } => {
            dispatch(&controller, ProjectAction::SubmitForAdminReview, &id).await?
        }
        ProjectCommand::AdminApprove { id } => {
            dispatch(&controller, ProjectAction::AdminApprove, &id).await?
        }
        ProjectCommand::AdminReject { id } => {
            dispatch(&controller, ProjectAction::AdminReject, &id).await?
        }
        ProjectCommand::SubmitSuperadmin { id } => {
            dispatch(&controller, ProjectAction::SubmitForSuperAdminReview, &id).await?
        }
        ProjectCommand::SuperadminApprove { id, .. } => {
            dispatch(&controller, ProjectAction::SuperAdminApprove, &id).await?
        }
        ProjectCommand::SuperadminReject { id, .. } => {
            dispatch(&controller, ProjectAction::SuperAdminReject, &id).await?
        }
        ProjectCommand::Delete { id } => dispatch(&controller, ProjectAction::Delete, &id).await?,
    }

    print!("{}", render::projects(&controller.projects()));
    Ok(())
}

fn report(err: ActionError) -> anyhow::Error {
    anyhow::anyhow!(render::action_error(&err))
}

fn lookup(controller: &ProjectsController, id: &ResourceId) -> anyhow::Result<Project> {
    match controller.find(id) {
        Some(project) => Ok(project),
        None => bail!("No project with internal ID {id}"),
    }
}

async fn dispatch(
    controller: &ProjectsController,
    action: ProjectAction,
    id: &ResourceId,
) -> anyhow::Result<()> {
    let project = lookup(controller, id)?;
    let outcome = controller.dispatch(action, &project).await.map_err(report)?;
    print_outcome(controller, outcome, &format!("Done: {action}"));
    Ok(())
}

fn print_outcome(controller: &ProjectsController, outcome: Outcome, fallback: &str) {
    match outcome {
        Outcome::Applied => println!("{}", controller.notice().as_deref().unwrap_or(fallback)),
        Outcome::Cancelled => println!("Cancelled"),
    }
}

fn list_query(args: &ProjectListArgs) -> ProjectQuery {
    let status = args.status.as_deref().map(ProjectStatus::parse);
    if let Some(ProjectStatus::Other(raw)) = &status {
        let known: Vec<&str> = ProjectStatus::KNOWN.iter().map(ProjectStatus::as_str).collect();
        tracing::warn!(status = %raw, known = %known.join(", "), "Filtering on an unknown status");
    }
    ProjectQuery {
        customer_id: args.customer,
        buid: args.bu,
        billing_type_id: args.billing_type,
        segment_id: args.segment,
        status,
        sort_by: args.sort,
        sort_order: args.order,
    }
}

fn create_form(fields: ProjectFields) -> ProjectForm {
    ProjectForm {
        project_internal_id: None,
        project_name: fields.name,
        project_abbreviation: fields.abbreviation,
        customer_id: ForeignKeyInput::Typed(fields.customer),
        buid: ForeignKeyInput::Typed(fields.bu),
        billing_type_id: ForeignKeyInput::Typed(fields.billing_type),
        segment_id: ForeignKeyInput::Typed(fields.segment),
        project_location_city: fields.city,
        customer_address: fields.address,
        project_start_date: Some(fields.start),
        project_end_date: Some(fields.end),
        resource_requirement: fields.resources,
    }
}

fn update_form(project: &Project, fields: ProjectFieldsUpdate) -> ProjectForm {
    let mut form = ProjectForm::from_project(project);
    if let Some(v) = fields.name {
        form.project_name = v;
    }
    if let Some(v) = fields.abbreviation {
        form.project_abbreviation = v;
    }
    if let Some(v) = fields.customer {
        form.customer_id = ForeignKeyInput::Typed(v);
    }
    if let Some(v) = fields.bu {
        form.buid = ForeignKeyInput::Typed(v);
    }
    if let Some(v) = fields.billing_type {
        form.billing_type_id = ForeignKeyInput::Typed(v);
    }
    if let Some(v) = fields.segment {
        form.segment_id = ForeignKeyInput::Typed(v);
    }
    if let Some(v) = fields.city {
        form.project_location_city = v;
    }
    if let Some(v) = fields.address {
        form.customer_address = v;
    }
    if let Some(v) = fields.start {
        form.project_start_date = Some(v);
    }
    if let Some(v) = fields.end {
        form.project_end_date = Some(v);
    }
    if let Some(v) = fields.resources {
        form.resource_requirement = v;
    }
    form
}

// ---------------------------------------------------------------------------
// Customers, users, roles
// ---------------------------------------------------------------------------

async fn finish_delete<R: CrudResource>(screen: &CrudScreen<R>, id: i64) -> anyhow::Result<()> {
    match screen.delete(id).await.map_err(|e| anyhow::anyhow!(render::api_error(&e)))? {
        Outcome::Applied => println!("Deleted {} {id}", R::NOUN),
        Outcome::Cancelled => println!("Cancelled"),
    }
    Ok(())
}

fn api_failure(err: pidgen_client::ApiError) -> anyhow::Error {
    anyhow::anyhow!(render::api_error(&err))
}

async fn run_customers(
    cmd: CustomerCommand,
    client: Arc<ApiClient>,
    assume_yes: bool,
) -> anyhow::Result<()> {
    let screen = CrudScreen::new(Customers, client, confirmer(assume_yes, None));
    screen.load().await.map_err(api_failure)?;
    match cmd {
        CustomerCommand::List => {}
        CustomerCommand::Create(fields) => {
            let payload = apply_customer_fields(CustomerPayload::default(), fields);
            screen.create(&payload).await.map_err(api_failure)?;
            println!("Customer created");
        }
        CustomerCommand::Update { id, fields } => {
            let Some(existing) = screen.find(id) else {
                bail!("No customer with ID {id}");
            };
            let payload = apply_customer_fields(CustomerPayload::from_customer(&existing), fields);
            screen.update(id, &payload).await.map_err(api_failure)?;
            println!("Customer updated");
        }
        CustomerCommand::Delete { id } => finish_delete(&screen, id).await?,
    }
    print!("{}", render::customers(&screen.records()));
    Ok(())
}

fn apply_customer_fields(mut payload: CustomerPayload, f: CustomerFields) -> CustomerPayload {
    if let Some(v) = f.name {
        payload.customer_name = v;
    }
    if let Some(v) = f.abbreviation {
        payload.customer_abbreviation = v;
    }
    if let Some(v) = f.code {
        payload.customer_code = v;
    }
    if f.bu.is_some() {
        payload.assigned_buid = f.bu;
    }
    if let Some(v) = f.bu_name {
        payload.bu_name = v;
    }
    if let Some(v) = f.bu_code {
        payload.bu_code = v;
    }
    if let Some(v) = f.gst_document {
        payload.gst_document_path = v;
    }
    if let Some(v) = f.address {
        payload.full_postal_address = v;
    }
    if let Some(v) = f.city {
        payload.city = v;
    }
    if let Some(v) = f.email {
        payload.email = Some(v).filter(|e| !e.trim().is_empty());
    }
    if let Some(v) = f.phone {
        payload.phone = v;
    }
    if let Some(v) = f.customer_type {
        payload.customer_type = v;
    }
    if let Some(v) = f.active {
        payload.is_active = v;
    }
    payload
}

async fn run_users(
    cmd: UserCommand,
    client: Arc<ApiClient>,
    assume_yes: bool,
) -> anyhow::Result<()> {
    let screen = CrudScreen::new(Users, client, confirmer(assume_yes, None));
    screen.load().await.map_err(api_failure)?;
    match cmd {
        UserCommand::List => {}
        UserCommand::Create(fields) => {
            let password = fields.password.clone().unwrap_or_default();
            let blank = UserPayload {
                username: String::new(),
                email: String::new(),
                password: None,
                first_name: String::new(),
                last_name: String::new(),
                role_id: 0,
                is_active: true,
            };
            let payload = apply_user_fields(blank, fields)
                .with_password(&password, false)
                .map_err(anyhow::Error::msg)?;
            screen.create(&payload).await.map_err(api_failure)?;
            println!("User created");
        }
        UserCommand::Update { id, fields } => {
            let Some(existing) = screen.find(id) else {
                bail!("No user with ID {id}");
            };
            let password = fields.password.clone().unwrap_or_default();
            let payload = apply_user_fields(UserPayload::from_user(&existing), fields)
                .with_password(&password, true)
                .map_err(anyhow::Error::msg)?;
            screen.update(id, &payload).await.map_err(api_failure)?;
            println!("User updated");
        }
        UserCommand::Delete { id } => finish_delete(&screen, id).await?,
    }
    print!("{}", render::users(&screen.records()));
    Ok(())
}

fn apply_user_fields(mut payload: UserPayload, f: UserFields) -> UserPayload {
    if let Some(v) = f.username {
        payload.username = v;
    }
    if let Some(v) = f.email {
        payload.email = v;
    }
    if let Some(v) = f.first_name {
        payload.first_name = v;
    }
    if let Some(v) = f.last_name {
        payload.last_name = v;
    }
    if let Some(v) = f.role_id {
        payload.role_id = v;
    }
    if let Some(v) = f.active {
        payload.is_active = v;
    }
    payload
}

async fn run_roles(
    cmd: RoleCommand,
    client: Arc<ApiClient>,
    assume_yes: bool,
) -> anyhow::Result<()> {
    let screen = CrudScreen::new(Roles, client, confirmer(assume_yes, None));
    screen.load().await.map_err(api_failure)?;
    match cmd {
        RoleCommand::List => {}
        RoleCommand::Create { name, active } => {
            let payload = RolePayload {
                role_name: name,
                is_active: active,
            };
            screen.create(&payload).await.map_err(api_failure)?;
            println!("Role created");
        }
        RoleCommand::Update { id, name, active } => {
            let Some(existing) = screen.find(id) else {
                bail!("No role with ID {id}");
            };
            let payload = RolePayload {
                role_name: name.unwrap_or(existing.role_name),
                is_active: active.unwrap_or(existing.is_active),
            };
            screen.update(id, &payload).await.map_err(api_failure)?;
            println!("Role updated");
        }
        RoleCommand::Delete { id } => finish_delete(&screen, id).await?,
    }
    print!("{}", render::roles(&screen.records()));
    Ok(())
}
