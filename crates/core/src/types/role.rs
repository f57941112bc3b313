//! Coarse permission roles carried in session tokens.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A permission label attached to a session.
///
/// Roles gate mutating billing operations: `Admin` may create, update and
/// delete records; `User` (everyone else) may only read. Serialises as the
/// lowercase strings embedded in session tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access to billing mutations.
    Admin,
    /// Read-only access.
    User,
}

impl Role {
    /// Returns the wire representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
