//! Project workflow status.
//!
//! The backend owns the state machine; these are the states the client has
//! observed. Unknown status strings survive as [`ProjectStatus::Other`] so a
//! new server-side state never breaks list loading.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $wire:expr ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// A status string the client does not recognise.
            Other(String),
        }

        impl $name {
            /// Every recognised status, in workflow order.
            pub const KNOWN: &'static [$name] = &[ $( $name::$variant ),+ ];

            /// Canonical wire name.
            pub fn as_str(&self) -> &str {
                match self {
                    $( $name::$variant => $wire, )+
                    $name::Other(raw) => raw,
                }
            }

            /// Parse a wire name, ignoring case, spaces, `_` and `-`.
            pub fn parse(raw: &str) -> Self {
                let folded = fold(raw);
                $(
                    if folded == fold($wire) {
                        return $name::$variant;
                    }
                )+
                $name::Other(raw.to_string())
            }
        }
    };
}

fn fold(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

define_status_enum! {
    /// Project lifecycle status.
    ProjectStatus {
        /// Created, editable, no PID yet.
        Draft = "Draft",
        PendingAdminReview = "PendingAdminReview",
        AdminApproved = "AdminApproved",
        AdminRejected = "AdminRejected",
        PendingSuperAdminReview = "PendingSuperAdminReview",
        /// Terminal success.
        SuperAdminApproved = "SuperAdminApproved",
        /// Terminal failure.
        SuperAdminRejected = "SuperAdminRejected",
    }
}

impl Default for ProjectStatus {
    fn default() -> Self {
        ProjectStatus::Draft
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ProjectStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProjectStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(ProjectStatus::parse(&raw))
    }
}
