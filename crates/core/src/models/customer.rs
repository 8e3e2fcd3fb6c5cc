//! Customer entity model and write DTO.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{null_as_empty, DbId, Timestamp};

/// A customer as returned by `GET /Customers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(rename = "customerID")]
    pub customer_id: DbId,
    #[serde(rename = "customerName", default, deserialize_with = "null_as_empty")]
    pub customer_name: String,
    #[serde(
        rename = "customerAbbreviation",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub customer_abbreviation: String,
    #[serde(rename = "customerCode", default, deserialize_with = "null_as_empty")]
    pub customer_code: String,
    #[serde(rename = "assignedBUID", default)]
    pub assigned_buid: Option<DbId>,
    #[serde(rename = "buName", default)]
    pub bu_name: Option<String>,
    #[serde(rename = "buCode", default)]
    pub bu_code: Option<String>,
    #[serde(rename = "gstDocumentPath", default)]
    pub gst_document_path: Option<String>,
    #[serde(rename = "fullPostalAddress", default)]
    pub full_postal_address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(rename = "type", default)]
    pub customer_type: Option<String>,
    #[serde(rename = "isActive", default = "default_active")]
    pub is_active: bool,
    #[serde(
        rename = "createdDate",
        default,
        with = "crate::types::lenient_timestamp"
    )]
    pub created_date: Option<Timestamp>,
    #[serde(rename = "createdByUserName", default)]
    pub created_by_user_name: Option<String>,
}

fn default_active() -> bool {
    true
}

/// Body of `POST /Customers` and `PUT /Customers/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct CustomerPayload {
    /// Echoed on update, absent on create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<DbId>,
    #[serde(rename = "customerName")]
    #[validate(length(min = 1, message = "Name is required"))]
    pub customer_name: String,
    #[serde(rename = "customerAbbreviation")]
    pub customer_abbreviation: String,
    #[serde(rename = "customerCode")]
    pub customer_code: String,
    #[serde(rename = "assignedBUID")]
    pub assigned_buid: Option<DbId>,
    #[serde(rename = "buName")]
    pub bu_name: String,
    #[serde(rename = "buCode")]
    pub bu_code: String,
    #[serde(rename = "gstDocumentPath")]
    pub gst_document_path: String,
    #[serde(rename = "fullPostalAddress")]
    pub full_postal_address: String,
    pub city: String,
    #[validate(email(message = "Email is not valid"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub phone: String,
    #[serde(rename = "type")]
    pub customer_type: String,
    #[serde(rename = "isActive")]
    pub is_active: bool,
}

impl Default for CustomerPayload {
    fn default() -> Self {
        Self {
            id: None,
            customer_name: String::new(),
            customer_abbreviation: String::new(),
            customer_code: String::new(),
            assigned_buid: None,
            bu_name: String::new(),
            bu_code: String::new(),
            gst_document_path: String::new(),
            full_postal_address: String::new(),
            city: String::new(),
            email: None,
            phone: String::new(),
            customer_type: String::new(),
            is_active: true,
        }
    }
}

impl CustomerPayload {
    /// Pre-fill an edit payload from an existing customer.
    pub fn from_customer(customer: &Customer) -> Self {
        Self {
            id: Some(customer.customer_id),
            customer_name: customer.customer_name.clone(),
            customer_abbreviation: customer.customer_abbreviation.clone(),
            customer_code: customer.customer_code.clone(),
            assigned_buid: customer.assigned_buid,
            bu_name: customer.bu_name.clone().unwrap_or_default(),
            bu_code: customer.bu_code.clone().unwrap_or_default(),
            gst_document_path: customer.gst_document_path.clone().unwrap_or_default(),
            full_postal_address: customer.full_postal_address.clone().unwrap_or_default(),
            city: customer.city.clone().unwrap_or_default(),
            email: customer.email.clone().filter(|e| !e.is_empty()),
            phone: customer.phone.clone().unwrap_or_default(),
            customer_type: customer.customer_type.clone().unwrap_or_default(),
            is_active: customer.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_defaults_to_active() {
        let customer: Customer = serde_json::from_value(serde_json::json!({
            "customerID": 1,
            "customerName": "Acme Corp",
            "createdDate": "2023-07-22T00:00:00",
            "createdByUserName": "admin"
        }))
        .unwrap();
        assert!(customer.is_active);
        assert_eq!(customer.customer_code, "");
    }

    #[test]
    fn test_payload_requires_name() {
        let payload = CustomerPayload::default();
        assert!(payload.validate().is_err());

        let payload = CustomerPayload {
            customer_name: "Acme".into(),
            ..Default::default()
        };
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn test_payload_rejects_malformed_email() {
        let payload = CustomerPayload {
            customer_name: "Acme".into(),
            email: Some("not-an-email".into()),
            ..Default::default()
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_payload_uses_backend_field_names() {
        let payload = CustomerPayload {
            customer_name: "Acme".into(),
            assigned_buid: Some(2),
            customer_type: "Enterprise".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["customerName"], "Acme");
        assert_eq!(json["assignedBUID"], 2);
        assert_eq!(json["type"], "Enterprise");
        assert!(json.get("id").is_none());
    }
}
