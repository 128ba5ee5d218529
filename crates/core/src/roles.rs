//! Well-known role names carried in the `role` claim of access tokens.

use serde::{Deserialize, Serialize};

pub const ROLE_STUDENT: &str = "student";
pub const ROLE_STAFF: &str = "staff";
pub const ROLE_ADMIN: &str = "admin";

/// Caller role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Staff,
    Admin,
}

impl Role {
    /// Resolve the role claim. Missing or unrecognised roles get the least
    /// privileged role.
    pub fn from_claim(claim: Option<&str>) -> Self {
        match claim {
            Some(ROLE_ADMIN) => Self::Admin,
            Some(ROLE_STAFF) => Self::Staff,
            _ => Self::Student,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => ROLE_STUDENT,
            Self::Staff => ROLE_STAFF,
            Self::Admin => ROLE_ADMIN,
        }
    }

    /// Staff and admins operate the counter and see mess-wide data.
    pub fn is_staff(&self) -> bool {
        matches!(self, Self::Staff | Self::Admin)
    }
}
