//! Session token claims.

use premia_core::{Email, Role};
use serde::{Deserialize, Serialize};

/// Decoded payload of an application session token.
///
/// Ephemeral: never persisted, its existence is the validity of the token's
/// signature and expiry. The access guard attaches it to request extensions
/// after verification so handlers and the role check can read it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Billing record id when the email matched a row, else the Google
    /// subject id.
    pub sub: String,
    /// Verified email of the caller.
    pub email: Email,
    /// Roles granted at login.
    pub roles: Vec<Role>,
    /// Expiry, seconds since the Unix epoch.
    pub exp: u64,
}

impl SessionClaims {
    /// Whether the claim set grants any of the given roles.
    #[must_use]
    pub fn has_any_role(&self, required: &[Role]) -> bool {
        required.iter().any(|role| self.roles.contains(role))
    }
}
