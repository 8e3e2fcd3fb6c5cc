//! Joining projects with reference-data names for display.
//!
//! Enrichment is a pure function: it never mutates its inputs and returns a
//! fresh list. It refuses to run until every reference list is loaded, so a
//! project is never shown half-enriched.

use std::collections::HashMap;

use crate::models::customer::Customer;
use crate::models::project::{Enrichment, Project};
use crate::models::reference::{BillingType, BusinessUnit, Segment};
use crate::types::DbId;

/// The four reference lists a project's foreign keys point into.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceData {
    pub customers: Vec<Customer>,
    pub business_units: Vec<BusinessUnit>,
    pub billing_types: Vec<BillingType>,
    pub segments: Vec<Segment>,
}

impl ReferenceData {
    /// True once all four lists are non-empty.
    pub fn is_complete(&self) -> bool {
        !self.customers.is_empty()
            && !self.business_units.is_empty()
            && !self.billing_types.is_empty()
            && !self.segments.is_empty()
    }

    /// Names of the lists that are still empty, for diagnostics.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.customers.is_empty() {
            missing.push("customers");
        }
        if self.business_units.is_empty() {
            missing.push("business units");
        }
        if self.billing_types.is_empty() {
            missing.push("billing types");
        }
        if self.segments.is_empty() {
            missing.push("segments");
        }
        missing
    }
}

/// Enrich every project with names from `reference`.
///
/// Returns `None` when any reference list is empty. Foreign keys with no
/// matching reference row enrich to empty strings. Running it again over an
/// already-enriched list yields the same names.
pub fn enrich(projects: &[Project], reference: &ReferenceData) -> Option<Vec<Project>> {
    if !reference.is_complete() {
        return None;
    }

    let customers: HashMap<DbId, &Customer> = reference
        .customers
        .iter()
        .map(|c| (c.customer_id, c))
        .collect();
    let units: HashMap<DbId, &BusinessUnit> = reference
        .business_units
        .iter()
        .map(|b| (b.buid, b))
        .collect();
    let billing: HashMap<DbId, &BillingType> = reference
        .billing_types
        .iter()
        .map(|b| (b.billing_type_id, b))
        .collect();
    let segments: HashMap<DbId, &Segment> = reference
        .segments
        .iter()
        .map(|s| (s.segment_id, s))
        .collect();

    let enriched = projects
        .iter()
        .map(|project| {
            let customer = project.customer_id.and_then(|id| customers.get(&id));
            let unit = project.buid.and_then(|id| units.get(&id));
            let billing_type = project.billing_type_id.and_then(|id| billing.get(&id));
            let segment = project.segment_id.and_then(|id| segments.get(&id));

            let enrichment = Enrichment {
                customer_name: customer.map(|c| c.customer_name.clone()).unwrap_or_default(),
                customer_abbreviation: customer
                    .map(|c| c.customer_abbreviation.clone())
                    .unwrap_or_default(),
                customer_code: customer.map(|c| c.customer_code.clone()).unwrap_or_default(),
                bu_name: unit.map(|b| b.bu_name.clone()).unwrap_or_default(),
                bu_code: unit.map(|b| b.bu_code.clone()).unwrap_or_default(),
                billing_type_name: billing_type
                    .map(|b| b.billing_type_name.clone())
                    .unwrap_or_default(),
                billing_type_code: billing_type
                    .map(|b| b.billing_type_code.clone())
                    .unwrap_or_default(),
                segment_name: segment.map(|s| s.segment_name.clone()).unwrap_or_default(),
            };

            Project {
                enrichment,
                ..project.clone()
            }
        })
        .collect();

    Some(enriched)
}
