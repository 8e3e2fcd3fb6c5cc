//! Login request and the user info returned with the bearer token.

use serde::{Deserialize, Serialize};

use crate::roles::Role;
use crate::types::DbId;

/// Body of `POST /Auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response. The token field is accepted under the names the backend
/// has been seen to use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(alias = "accessToken", alias = "access_token")]
    pub token: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default, alias = "roleName")]
    pub role: Option<Role>,
    #[serde(rename = "userId", default, alias = "userID")]
    pub user_id: Option<DbId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_info_accepts_token_aliases() {
        let info: UserInfo = serde_json::from_value(serde_json::json!({
            "accessToken": "abc",
            "username": "superadmin",
            "roleName": "SuperAdmin"
        }))
        .unwrap();
        assert_eq!(info.token, "abc");
        assert_eq!(info.role, Some(Role::SuperAdmin));
        assert!(info.user_id.is_none());
    }

    #[test]
    fn test_user_info_requires_token() {
        let result: Result<UserInfo, _> =
            serde_json::from_value(serde_json::json!({ "username": "x" }));
        assert!(result.is_err());
    }
}
