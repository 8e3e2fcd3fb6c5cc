use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use pidgen_core::listing::{SortKey, SortOrder};
use pidgen_core::types::{DbId, ResourceId};

/// Project ID tool console.
#[derive(Debug, Parser)]
#[command(name = "pidgen", version, about = "Project ID tool console")]
pub struct Cli {
    /// Backend base URL. Overrides PIDGEN_API_URL.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Answer yes to every confirmation prompt.
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and store the session.
    Login {
        #[arg(long, short = 'u')]
        username: String,
        /// Read from stdin when omitted.
        #[arg(long, env = "PIDGEN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Forget the stored session.
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// Projects and the review workflow.
    #[command(subcommand)]
    Projects(ProjectCommand),
    #[command(subcommand)]
    Customers(CustomerCommand),
    #[command(subcommand)]
    Users(UserCommand),
    #[command(subcommand)]
    Roles(RoleCommand),
    /// Read-only lookup lists.
    #[command(subcommand)]
    Reference(ReferenceCommand),
}

#[derive(Debug, Subcommand)]
pub enum ProjectCommand {
    List(ProjectListArgs),
    Show {
        id: ResourceId,
    },
    Create(ProjectFields),
    Update {
        id: ResourceId,
        #[command(flatten)]
        fields: ProjectFieldsUpdate,
    },
    GeneratePid {
        id: ResourceId,
    },
    SubmitAdmin {
        id: ResourceId,
    },
    AdminApprove {
        id: ResourceId,
    },
    AdminReject {
        id: ResourceId,
    },
    SubmitSuperadmin {
        id: ResourceId,
    },
    SuperadminApprove {
        id: ResourceId,
        /// Skip the remarks prompt.
        #[arg(long)]
        remarks: Option<String>,
    },
    SuperadminReject {
        id: ResourceId,
        /// Skip the remarks prompt.
        #[arg(long)]
        remarks: Option<String>,
    },
    Delete {
        id: ResourceId,
    },
}

#[derive(Debug, Args)]
pub struct ProjectListArgs {
    #[arg(long)]
    pub customer: Option<DbId>,
    #[arg(long)]
    pub bu: Option<DbId>,
    #[arg(long)]
    pub billing_type: Option<DbId>,
    #[arg(long)]
    pub segment: Option<DbId>,
    #[arg(long)]
    pub status: Option<String>,
    /// created, name, customer, bu or status.
    #[arg(long, default_value = "created")]
    pub sort: SortKey,
    /// asc or desc.
    #[arg(long, default_value = "desc")]
    pub order: SortOrder,
}

/// Every field of a new project. Foreign keys are taken as typed.
#[derive(Debug, Args)]
pub struct ProjectFields {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub abbreviation: String,
    #[arg(long)]
    pub customer: String,
    #[arg(long)]
    pub bu: String,
    #[arg(long)]
    pub billing_type: String,
    #[arg(long)]
    pub segment: String,
    #[arg(long)]
    pub city: String,
    #[arg(long, default_value = "")]
    pub address: String,
    /// YYYY-MM-DD
    #[arg(long)]
    pub start: NaiveDate,
    /// YYYY-MM-DD
    #[arg(long)]
    pub end: NaiveDate,
    #[arg(long, default_value = "")]
    pub resources: String,
}

/// Fields to change on an existing project; the rest are kept.
#[derive(Debug, Args)]
pub struct ProjectFieldsUpdate {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub abbreviation: Option<String>,
    #[arg(long)]
    pub customer: Option<String>,
    #[arg(long)]
    pub bu: Option<String>,
    #[arg(long)]
    pub billing_type: Option<String>,
    #[arg(long)]
    pub segment: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub start: Option<NaiveDate>,
    #[arg(long)]
    pub end: Option<NaiveDate>,
    #[arg(long)]
    pub resources: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum CustomerCommand {
    List,
    Create(CustomerFields),
    Update {
        id: DbId,
        #[command(flatten)]
        fields: CustomerFields,
    },
    Delete {
        id: DbId,
    },
}

/// On update, omitted options keep the stored value.
#[derive(Debug, Args)]
pub struct CustomerFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub abbreviation: Option<String>,
    #[arg(long)]
    pub code: Option<String>,
    /// Assigned business unit id.
    #[arg(long)]
    pub bu: Option<DbId>,
    #[arg(long)]
    pub bu_name: Option<String>,
    #[arg(long)]
    pub bu_code: Option<String>,
    #[arg(long)]
    pub gst_document: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long = "type")]
    pub customer_type: Option<String>,
    #[arg(long)]
    pub active: Option<bool>,
}

#[derive(Debug, Subcommand)]
pub enum UserCommand {
    List,
    Create(UserFields),
    Update {
        id: DbId,
        #[command(flatten)]
        fields: UserFields,
    },
    Delete {
        id: DbId,
    },
}

/// On update, omitted options keep the stored value and an omitted or
/// blank password leaves the password unchanged.
#[derive(Debug, Args)]
pub struct UserFields {
    #[arg(long)]
    pub username: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long, env = "PIDGEN_USER_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub role_id: Option<DbId>,
    #[arg(long)]
    pub active: Option<bool>,
}

#[derive(Debug, Subcommand)]
pub enum RoleCommand {
    List,
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value_t = true)]
        active: bool,
    },
    Update {
        id: DbId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },
    Delete {
        id: DbId,
    },
}

#[derive(Debug, Subcommand)]
pub enum ReferenceCommand {
    BusinessUnits,
    BillingTypes,
    Segments,
}
