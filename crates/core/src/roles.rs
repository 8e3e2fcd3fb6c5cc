//! Well-known role names and the role model used for action gating.
//!
//! Role names must match the `roleName` values the backend returns at login.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const ROLE_ADMIN: &str = "Admin";
pub const ROLE_SUPER_ADMIN: &str = "SuperAdmin";

/// The signed-in user's role as far as the client is concerned.
///
/// Only `Admin` and `SuperAdmin` gate actions; any other role name is kept
/// verbatim for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    SuperAdmin,
    Other(String),
}

impl Role {
    /// Parse a server role name. Matching ignores case, spaces and `_`/`-`
    /// so `"Super Admin"` and `"super_admin"` both map to [`Role::SuperAdmin`].
    pub fn parse(name: &str) -> Self {
        let folded: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match folded.as_str() {
            "admin" => Role::Admin,
            "superadmin" => Role::SuperAdmin,
            _ => Role::Other(name.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => ROLE_ADMIN,
            Role::SuperAdmin => ROLE_SUPER_ADMIN,
            Role::Other(name) => name,
        }
    }

    /// Admin or SuperAdmin.
    pub fn is_administrative(&self) -> bool {
        matches!(self, Role::Admin | Role::SuperAdmin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Role::parse(&name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_is_lenient() {
        assert_eq!(Role::parse("Admin"), Role::Admin);
        assert_eq!(Role::parse("SuperAdmin"), Role::SuperAdmin);
        assert_eq!(Role::parse("super_admin"), Role::SuperAdmin);
        assert_eq!(Role::parse("Super Admin"), Role::SuperAdmin);
        assert_eq!(Role::parse("Viewer"), Role::Other("Viewer".into()));
    }

    #[test]
    fn test_role_names_round_trip_through_display() {
        assert_eq!(Role::Admin.to_string(), ROLE_ADMIN);
        assert_eq!(Role::SuperAdmin.to_string(), ROLE_SUPER_ADMIN);
        assert_eq!(Role::Other("Viewer".into()).to_string(), "Viewer");
    }

    #[test]
    fn test_only_admin_roles_are_administrative() {
        assert!(Role::Admin.is_administrative());
        assert!(Role::SuperAdmin.is_administrative());
        assert!(!Role::Other("User".into()).is_administrative());
    }
}
