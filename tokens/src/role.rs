//! User roles.

#[cfg(test)]
#[path = "role_test.rs"]
mod tests;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Privilege level attached to every user account.
///
/// Variants are declared in ascending privilege so the derived ordering can
/// answer "does this role grant that one".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Storefront customer.
    #[default]
    User,
    /// Dashboard operator.
    Admin,
    /// Operator allowed to manage other operators.
    SuperAdmin,
}

impl Role {
    /// Every role, lowest privilege first.
    pub const ALL: [Self; 3] = [Self::User, Self::Admin, Self::SuperAdmin];

    /// Wire and database spelling.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
            Self::SuperAdmin => "SUPERADMIN",
        }
    }

    /// Whether a holder of `self` may access something requiring `required`.
    #[must_use]
    pub fn grants(self, required: Self) -> bool {
        self >= required
    }

    /// Whether this role may open the admin dashboard.
    #[must_use]
    pub fn is_staff(self) -> bool {
        self.grants(Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct RoleParseError(pub String);

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USER" => Ok(Self::User),
            "ADMIN" => Ok(Self::Admin),
            "SUPERADMIN" => Ok(Self::SuperAdmin),
            _ => Err(RoleParseError(s.to_owned())),
        }
    }
}
