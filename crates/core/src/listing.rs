//! Filtering and ordering of the project list for display.
//!
//! The default order is newest `createdDate` first. Records without a date
//! always sort last, whichever direction is chosen.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::str::FromStr;

use crate::models::project::Project;
use crate::status::ProjectStatus;
use crate::types::DbId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    CreatedDate,
    ProjectName,
    CustomerName,
    BuName,
    Status,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "createdDate" | "created-date" | "created" => Ok(SortKey::CreatedDate),
            "projectName" | "project-name" | "name" => Ok(SortKey::ProjectName),
            "customerName" | "customer-name" | "customer" => Ok(SortKey::CustomerName),
            "buName" | "bu-name" | "bu" => Ok(SortKey::BuName),
            "status" => Ok(SortKey::Status),
            other => Err(format!(
                "Invalid sort key '{other}'. Must be one of: created, name, customer, bu, status"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Asc),
            "desc" | "descending" => Ok(SortOrder::Desc),
            other => Err(format!("Invalid sort order '{other}'. Must be asc or desc")),
        }
    }
}

/// Filter panel state. `None` means "All".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectQuery {
    pub customer_id: Option<DbId>,
    pub buid: Option<DbId>,
    pub billing_type_id: Option<DbId>,
    pub segment_id: Option<DbId>,
    pub status: Option<ProjectStatus>,
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
}

impl ProjectQuery {
    pub fn matches(&self, project: &Project) -> bool {
        fn key_matches(wanted: Option<DbId>, actual: Option<DbId>) -> bool {
            wanted.is_none() || wanted == actual
        }

        key_matches(self.customer_id, project.customer_id)
            && key_matches(self.buid, project.buid)
            && key_matches(self.billing_type_id, project.billing_type_id)
            && key_matches(self.segment_id, project.segment_id)
            && self.status.as_ref().map_or(true, |s| *s == project.status)
    }

    /// Filter then sort. The input is left untouched.
    pub fn apply(&self, projects: &[Project]) -> Vec<Project> {
        let mut out: Vec<Project> = projects.iter().filter(|p| self.matches(p)).cloned().collect();
        sort_projects(&mut out, self.sort_by, self.sort_order);
        out
    }

    /// Back to "All" with the default ordering.
    pub fn reset(&mut self) {
        *self = ProjectQuery::default();
    }
}

/// Stable sort by `key` in `order`.
pub fn sort_projects(projects: &mut [Project], key: SortKey, order: SortOrder) {
    projects.sort_by(|a, b| compare(a, b, key, order));
}

/// The presentation rule applied after every reload.
pub fn sort_newest_first(projects: &mut [Project]) {
    sort_projects(projects, SortKey::CreatedDate, SortOrder::Desc);
}

fn compare(a: &Project, b: &Project, key: SortKey, order: SortOrder) -> Ordering {
    let directed = |ord: Ordering| match order {
        SortOrder::Asc => ord,
        SortOrder::Desc => ord.reverse(),
    };

    match key {
        SortKey::CreatedDate => match (a.created_date, b.created_date) {
            (Some(x), Some(y)) => directed(x.cmp(&y)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        SortKey::ProjectName => directed(case_fold_cmp(&a.project_name, &b.project_name)),
        SortKey::CustomerName => directed(case_fold_cmp(
            &a.enrichment.customer_name,
            &b.enrichment.customer_name,
        )),
        SortKey::BuName => directed(case_fold_cmp(&a.enrichment.bu_name, &b.enrichment.bu_name)),
        SortKey::Status => directed(case_fold_cmp(a.status.as_str(), b.status.as_str())),
    }
}

fn case_fold_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Drop later records that reuse a `projectInternalID` already seen, so the
/// list never shows two rows for one key.
pub fn dedupe_by_internal_id(projects: Vec<Project>) -> Vec<Project> {
    let mut seen = HashSet::new();
    projects
        .into_iter()
        .filter(|p| seen.insert(p.project_internal_id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::tests::project;
    use crate::types::ResourceId;

    fn ids(projects: &[Project]) -> Vec<ResourceId> {
        projects
            .iter()
            .map(|p| p.project_internal_id.clone())
            .collect()
    }

    #[test]
    fn test_newest_first() {
        let mut list = vec![
            project(1, "2024-01-01T00:00:00"),
            project(2, "2024-06-01T00:00:00"),
        ];
        sort_newest_first(&mut list);
        assert_eq!(ids(&list), vec![ResourceId::Int(2), ResourceId::Int(1)]);
    }

    #[test]
    fn test_undated_projects_sort_last_both_ways() {
        let mut undated = project(3, "2024-03-01T00:00:00");
        undated.created_date = None;
        let mut list = vec![undated, project(1, "2024-01-01T00:00:00")];

        sort_projects(&mut list, SortKey::CreatedDate, SortOrder::Asc);
        assert_eq!(list[1].project_internal_id, ResourceId::Int(3));

        sort_projects(&mut list, SortKey::CreatedDate, SortOrder::Desc);
        assert_eq!(list[1].project_internal_id, ResourceId::Int(3));
    }

    #[test]
    fn test_filter_by_status_and_customer() {
        let mut pending = project(1, "2024-01-01T00:00:00");
        pending.status = ProjectStatus::PendingAdminReview;
        let mut other_customer = project(2, "2024-02-01T00:00:00");
        other_customer.customer_id = Some(8);
        let draft = project(3, "2024-03-01T00:00:00");

        let query = ProjectQuery {
            status: Some(ProjectStatus::Draft),
            customer_id: Some(3),
            ..Default::default()
        };
        let out = query.apply(&[pending, other_customer, draft]);
        assert_eq!(ids(&out), vec![ResourceId::Int(3)]);
    }

    #[test]
    fn test_sort_by_name_ascending_is_case_insensitive() {
        let mut a = project(1, "2024-01-01T00:00:00");
        a.project_name = "beta".into();
        let mut b = project(2, "2024-01-01T00:00:00");
        b.project_name = "Alpha".into();

        let query = ProjectQuery {
            sort_by: SortKey::ProjectName,
            sort_order: SortOrder::Asc,
            ..Default::default()
        };
        let out = query.apply(&[a, b]);
        assert_eq!(ids(&out), vec![ResourceId::Int(2), ResourceId::Int(1)]);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut query = ProjectQuery {
            buid: Some(2),
            sort_by: SortKey::Status,
            sort_order: SortOrder::Asc,
            ..Default::default()
        };
        query.reset();
        assert_eq!(query.sort_by, SortKey::CreatedDate);
        assert_eq!(query.sort_order, SortOrder::Desc);
        assert!(query.buid.is_none());
    }

    #[test]
    fn test_dedupe_keeps_first_occurrence() {
        let first = project(1, "2024-01-01T00:00:00");
        let mut dup = project(1, "2024-09-01T00:00:00");
        dup.project_name = "duplicate".into();
        let out = dedupe_by_internal_id(vec![first, dup, project(2, "2024-01-01T00:00:00")]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].project_name, "Project 1");
    }

    #[test]
    fn test_sort_parsers() {
        assert_eq!("customer".parse::<SortKey>().unwrap(), SortKey::CustomerName);
        assert_eq!("ASC".parse::<SortOrder>().unwrap(), SortOrder::Asc);
        assert!("size".parse::<SortKey>().is_err());
    }
}
