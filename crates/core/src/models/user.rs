//! User entity model and write DTO.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{null_as_empty, DbId};

/// A user row as returned by `GET /Users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "userId")]
    pub user_id: DbId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(rename = "firstName", default)]
    pub first_name: Option<String>,
    #[serde(rename = "lastName", default)]
    pub last_name: Option<String>,
    #[serde(rename = "roleId", default)]
    pub role_id: Option<DbId>,
    #[serde(rename = "roleName", default)]
    pub role_name: Option<String>,
    #[serde(rename = "isActive", default)]
    pub is_active: bool,
}

/// Body of `POST /Users` and `PUT /Users/{id}`.
///
/// `password` is omitted from the JSON entirely when `None`, so an edit with
/// a blank password leaves the stored password unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct UserPayload {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(email(message = "Email is not valid"))]
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    /// `0` means no role was picked.
    #[serde(rename = "roleId")]
    #[validate(range(min = 1, message = "Role is required"))]
    pub role_id: DbId,
    #[serde(rename = "isActive")]
    pub is_active: bool,
}

impl UserPayload {
    /// Normalize the password field: blank input in edit mode means "keep".
    ///
    /// In create mode a password is mandatory.
    pub fn with_password(mut self, password: &str, edit_mode: bool) -> Result<Self, String> {
        if password.is_empty() {
            if !edit_mode {
                return Err("Password is required".to_string());
            }
            self.password = None;
        } else {
            self.password = Some(password.to_string());
        }
        Ok(self)
    }

    /// Pre-fill an edit payload from an existing user. The password is never
    /// pre-filled.
    pub fn from_user(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            password: None,
            first_name: user.first_name.clone().unwrap_or_default(),
            last_name: user.last_name.clone().unwrap_or_default(),
            role_id: user.role_id.unwrap_or_default(),
            is_active: user.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> UserPayload {
        UserPayload {
            username: "jdoe".into(),
            email: "jdoe@example.com".into(),
            password: None,
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            role_id: 2,
            is_active: true,
        }
    }

    #[test]
    fn test_blank_password_in_edit_mode_is_omitted() {
        let body = payload().with_password("", true).unwrap();
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["roleId"], 2);
    }

    #[test]
    fn test_blank_password_in_create_mode_is_rejected() {
        assert!(payload().with_password("", false).is_err());
    }

    #[test]
    fn test_password_is_sent_when_present() {
        let body = payload().with_password("s3cret!", true).unwrap();
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["password"], "s3cret!");
    }

    #[test]
    fn test_payload_validates_email() {
        let mut body = payload();
        assert!(body.validate().is_ok());
        body.email = "nope".into();
        assert!(body.validate().is_err());
    }

    #[test]
    fn test_payload_requires_a_role() {
        let mut body = payload();
        body.role_id = 0;
        let errors = body.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("role_id"));
    }
}
