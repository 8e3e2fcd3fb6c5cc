//! Plain-text tables for stdout.

use pidgen_client::ApiError;
use pidgen_core::models::customer::Customer;
use pidgen_core::models::project::Project;
use pidgen_core::models::reference::{BillingType, BusinessUnit, Segment};
use pidgen_core::models::role::RoleRecord;
use pidgen_core::models::user::User;
use pidgen_core::types::Timestamp;

use crate::projects::ActionError;

/// Column-aligned text table.
#[derive(Debug, Default)]
pub struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<&'static str>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = (*w).max(cell.chars().count());
                }
            }
        }

        let line = |cells: Vec<String>| -> String {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, w)| format!("{cell:<w$}"))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut out = line(self.headers.iter().map(|h| h.to_string()).collect());
        out.push('\n');
        out.push_str(&line(widths.iter().map(|w| "-".repeat(*w)).collect()));
        out.push('\n');
        for row in &self.rows {
            out.push_str(&line(row.clone()));
            out.push('\n');
        }
        if self.rows.is_empty() {
            out.push_str("(none)\n");
        }
        out
    }
}

fn opt(value: Option<&str>) -> String {
    value.unwrap_or("").to_string()
}

fn date(value: Option<Timestamp>) -> String {
    value
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn yes_no(active: bool) -> String {
    if active { "yes" } else { "no" }.to_string()
}

pub fn projects(list: &[Project]) -> String {
    let mut table = Table::new(vec![
        "ID", "CORE ID", "NAME", "ABBR", "CUSTOMER", "BU", "BILLING", "SEGMENT", "STATUS", "PID",
        "CREATED",
    ]);
    for p in list {
        table.push(vec![
            p.project_internal_id.to_string(),
            p.core_project_id
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            p.project_name.clone(),
            p.project_abbreviation.clone(),
            p.enrichment.customer_name.clone(),
            p.enrichment.bu_name.clone(),
            p.enrichment.billing_type_name.clone(),
            p.enrichment.segment_name.clone(),
            p.status.to_string(),
            opt(p.pid.as_deref()),
            date(p.created_date),
        ]);
    }
    table.render()
}

/// Full detail of one project, one field per line.
pub fn project_detail(p: &Project) -> String {
    let fields = [
        ("Internal ID", p.project_internal_id.to_string()),
        (
            "Core ID",
            p.core_project_id
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
        ),
        ("Name", p.project_name.clone()),
        ("Abbreviation", p.project_abbreviation.clone()),
        (
            "Customer",
            format!("{} ({})", p.enrichment.customer_name, p.enrichment.customer_code),
        ),
        (
            "Business unit",
            format!("{} ({})", p.enrichment.bu_name, p.enrichment.bu_code),
        ),
        (
            "Billing type",
            format!(
                "{} ({})",
                p.enrichment.billing_type_name, p.enrichment.billing_type_code
            ),
        ),
        ("Segment", p.enrichment.segment_name.clone()),
        ("City", opt(p.project_location_city.as_deref())),
        ("Address", opt(p.customer_address.as_deref())),
        ("Start", date(p.project_start_date)),
        ("End", date(p.project_end_date)),
        ("Resources", opt(p.resource_requirement.as_deref())),
        ("Status", p.status.to_string()),
        ("PID", opt(p.pid.as_deref())),
        ("Admin remarks", opt(p.admin_remarks.as_deref())),
        ("Superadmin remarks", opt(p.super_admin_remarks.as_deref())),
        ("Created", date(p.created_date)),
        ("Created by", opt(p.created_by_user_name.as_deref())),
    ];
    fields
        .iter()
        .map(|(label, value)| format!("{label:<18} {value}\n"))
        .collect()
}

pub fn customers(list: &[Customer]) -> String {
    let mut table = Table::new(vec!["ID", "NAME", "ABBR", "CODE", "BU", "CITY", "EMAIL", "ACTIVE"]);
    for c in list {
        table.push(vec![
            c.customer_id.to_string(),
            c.customer_name.clone(),
            c.customer_abbreviation.clone(),
            c.customer_code.clone(),
            opt(c.bu_name.as_deref()),
            opt(c.city.as_deref()),
            opt(c.email.as_deref()),
            yes_no(c.is_active),
        ]);
    }
    table.render()
}

pub fn users(list: &[User]) -> String {
    let mut table = Table::new(vec!["ID", "USERNAME", "EMAIL", "NAME", "ROLE", "ACTIVE"]);
    for u in list {
        let name = [u.first_name.as_deref(), u.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        table.push(vec![
            u.user_id.to_string(),
            u.username.clone(),
            u.email.clone(),
            name,
            opt(u.role_name.as_deref()),
            yes_no(u.is_active),
        ]);
    }
    table.render()
}

pub fn roles(list: &[RoleRecord]) -> String {
    let mut table = Table::new(vec!["ID", "NAME", "ACTIVE"]);
    for r in list {
        table.push(vec![r.role_id.to_string(), r.role_name.clone(), yes_no(r.is_active)]);
    }
    table.render()
}

pub fn business_units(list: &[BusinessUnit]) -> String {
    let mut table = Table::new(vec!["ID", "NAME", "CODE"]);
    for bu in list {
        table.push(vec![bu.buid.to_string(), bu.bu_name.clone(), bu.bu_code.clone()]);
    }
    table.render()
}

pub fn billing_types(list: &[BillingType]) -> String {
    let mut table = Table::new(vec!["ID", "NAME", "CODE"]);
    for bt in list {
        table.push(vec![
            bt.billing_type_id.to_string(),
            bt.billing_type_name.clone(),
            bt.billing_type_code.clone(),
        ]);
    }
    table.render()
}

pub fn segments(list: &[Segment]) -> String {
    let mut table = Table::new(vec!["ID", "NAME"]);
    for s in list {
        table.push(vec![s.segment_id.to_string(), s.segment_name.clone()]);
    }
    table.render()
}

/// Field errors one per line; anything else as a single line.
pub fn api_error(err: &ApiError) -> String {
    match err.field_errors() {
        Some(fields) => fields
            .iter()
            .map(|(field, messages)| format!("  {field}: {}\n", messages.join(", ")))
            .collect::<String>()
            .trim_end()
            .to_string(),
        None => err.to_string(),
    }
}

pub fn action_error(err: &ActionError) -> String {
    match err {
        ActionError::Api(api) => api_error(api),
        other => other.to_string(),
    }
}
