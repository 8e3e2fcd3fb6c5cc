//! Read-only lookup lists.

use pidgen_core::enrichment::ReferenceData;
use pidgen_core::models::reference::{BillingType, BusinessUnit, Segment};

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::routes;

impl ApiClient {
    pub async fn list_business_units(&self) -> Result<Vec<BusinessUnit>, ApiError> {
        self.get_list(routes::BUSINESS_UNITS).await
    }

    pub async fn list_billing_types(&self) -> Result<Vec<BillingType>, ApiError> {
        self.get_list(routes::BILLING_TYPES).await
    }

    pub async fn list_segments(&self) -> Result<Vec<Segment>, ApiError> {
        self.get_list(routes::SEGMENTS).await
    }

    /// Fetch all four lists concurrently. The first failure wins.
    pub async fn load_reference_data(&self) -> Result<ReferenceData, ApiError> {
        let (customers, business_units, billing_types, segments) = futures::try_join!(
            self.list_customers(),
            self.list_business_units(),
            self.list_billing_types(),
            self.list_segments(),
        )?;

        let data = ReferenceData {
            customers,
            business_units,
            billing_types,
            segments,
        };
        if !data.is_complete() {
            tracing::warn!(
                missing = ?data.missing(),
                "Reference data incomplete; projects will not be enriched"
            );
        }
        Ok(data)
    }
}
