//! Read-only lookup lists: business units, billing types and segments.

use serde::{Deserialize, Serialize};

use crate::types::{null_as_empty, DbId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessUnit {
    pub buid: DbId,
    #[serde(rename = "buName", default, deserialize_with = "null_as_empty")]
    pub bu_name: String,
    #[serde(rename = "buCode", default, deserialize_with = "null_as_empty")]
    pub bu_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingType {
    #[serde(rename = "billingTypeID")]
    pub billing_type_id: DbId,
    #[serde(
        rename = "billingTypeName",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub billing_type_name: String,
    #[serde(
        rename = "billingTypeCode",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub billing_type_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(rename = "segmentID")]
    pub segment_id: DbId,
    #[serde(rename = "segmentName", default, deserialize_with = "null_as_empty")]
    pub segment_name: String,
}
