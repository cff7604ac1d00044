//! Session context passed into every operation.
//!
//! Identity is established by the fronting session provider; the backend
//! trusts it and threads it explicitly instead of holding process-wide
//! current-user state.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of the acting user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Admin,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Student => write!(f, "student"),
            UserRole::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(UserRole::Student),
            "admin" => Ok(UserRole::Admin),
            _ => Err(()),
        }
    }
}

/// The authenticated user for the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionUser {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl SessionUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}
