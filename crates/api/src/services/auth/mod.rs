//! Authentication service.
//!
//! Turns a verified Google identity into an application session: looks up
//! the internal billing record by email, computes the role set, and mints a
//! signed, time-limited session token. Also hosts the token decode used by
//! the access guard.

mod error;

pub use error::AuthError;

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use sqlx::PgPool;

use premia_core::{Email, RecordId, Role};

use crate::config::PortalConfig;
use crate::db::BillingRepository;
use crate::models::SessionClaims;
use crate::services::google::{GoogleClaims, GoogleVerifier};

/// User payload returned to the frontend after login.
#[derive(Debug, Clone, Serialize)]
pub struct SessionUser {
    /// Internal record id, when the email matched a billing row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub email: Email,
    pub name: String,
    pub roles: Vec<Role>,
}

/// Successful login result: the user summary and the session token.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub user: SessionUser,
    pub token: String,
}

/// Authentication service.
pub struct AuthService<'a> {
    records: BillingRepository<'a>,
    verifier: &'a GoogleVerifier,
    config: &'a PortalConfig,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool, verifier: &'a GoogleVerifier, config: &'a PortalConfig) -> Self {
        Self {
            records: BillingRepository::new(pool),
            verifier,
            config,
        }
    }

    /// Log in with a Google ID token.
    ///
    /// Verifies the token, maps the identity to an internal record by email
    /// (first match), computes roles, and signs a session token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the Google token does not verify, carries no
    /// email, or the session token cannot be signed; repository failures
    /// propagate as `AuthError::Repository`.
    pub async fn login_with_google(&self, id_token: &str) -> Result<LoginResponse, AuthError> {
        let google = self.verifier.verify(id_token).await?;

        let email = google.email.as_deref().ok_or(AuthError::MissingEmail)?;
        let email = Email::parse(email)?;

        let record = self.records.find_by_email(email.as_str()).await?;
        let record_id = record.map(|r| r.id);

        let roles = compute_roles(&email, &self.config.admin_email);

        let claims = SessionClaims {
            // Internal id when known, Google's subject otherwise.
            sub: record_id.map_or_else(|| google.sub.clone(), |id| id.to_string()),
            email: email.clone(),
            roles: roles.clone(),
            exp: expiry_timestamp(self.config.jwt_expiry_secs),
        };
        let token = issue_session_token(&claims, &self.config.jwt_secret)?;

        tracing::info!(email = %email, ?roles, "google login successful");

        Ok(LoginResponse {
            user: SessionUser {
                id: record_id,
                email,
                name: display_name(&google),
                roles,
            },
            token,
        })
    }
}

/// Compute the role set for a verified email.
///
/// Exactly `[Admin]` when it equals the configured administrator email,
/// otherwise `[User]`.
#[must_use]
pub fn compute_roles(email: &Email, admin_email: &Email) -> Vec<Role> {
    if email == admin_email {
        vec![Role::Admin]
    } else {
        vec![Role::User]
    }
}

/// Best display name available from the Google claims.
fn display_name(google: &GoogleClaims) -> String {
    let joined = [google.given_name.as_deref(), google.family_name.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    if joined.is_empty() {
        google.name.clone().unwrap_or_default()
    } else {
        joined
    }
}

/// Expiry timestamp `lifetime_secs` from now, in seconds since the epoch.
#[must_use]
pub fn expiry_timestamp(lifetime_secs: u64) -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |now| now.as_secs())
        .saturating_add(lifetime_secs)
}

/// Sign a session token over the given claims.
///
/// # Errors
///
/// Returns `AuthError::TokenSigning` if encoding fails.
pub fn issue_session_token(
    claims: &SessionClaims,
    secret: &SecretString,
) -> Result<String, AuthError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
    )
    .map_err(AuthError::TokenSigning)
}

/// Verify a session token's signature and expiry, returning its claims.
///
/// # Errors
///
/// Returns `AuthError::SessionExpired` when only the expiry failed, and
/// `AuthError::InvalidSessionToken` for any other verification failure.
pub fn decode_session_token(
    token: &str,
    secret: &SecretString,
) -> Result<SessionClaims, AuthError> {
    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.expose_secret().as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::SessionExpired,
        _ => AuthError::InvalidSessionToken,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn secret() -> SecretString {
        SecretString::from("0123456789abcdef0123456789abcdef")
    }

    fn claims(exp: u64) -> SessionClaims {
        SessionClaims {
            sub: "7".to_string(),
            email: Email::parse("user@example.com").unwrap(),
            roles: vec![Role::User],
            exp,
        }
    }

    #[test]
    fn test_token_roundtrip() {
        let issued = claims(expiry_timestamp(3600));
        let token = issue_session_token(&issued, &secret()).unwrap();

        let decoded = decode_session_token(&token, &secret()).unwrap();
        assert_eq!(decoded.sub, "7");
        assert_eq!(decoded.email, issued.email);
        assert_eq!(decoded.roles, vec![Role::User]);
    }

    #[test]
    fn test_token_rejected_with_wrong_secret() {
        let token = issue_session_token(&claims(expiry_timestamp(3600)), &secret()).unwrap();

        let other = SecretString::from("fedcba9876543210fedcba9876543210");
        let result = decode_session_token(&token, &other);
        assert!(matches!(result, Err(AuthError::InvalidSessionToken)));
    }

    #[test]
    fn test_expired_token_has_distinct_reason() {
        // Well past the default validation leeway.
        let token = issue_session_token(&claims(expiry_timestamp(0) - 600), &secret()).unwrap();

        let result = decode_session_token(&token, &secret());
        assert!(matches!(result, Err(AuthError::SessionExpired)));
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        let result = decode_session_token("not-a-token", &secret());
        assert!(matches!(result, Err(AuthError::InvalidSessionToken)));
    }

    #[test]
    fn test_compute_roles() {
        let admin = Email::parse("admin@example.com").unwrap();
        let user = Email::parse("someone@example.com").unwrap();

        assert_eq!(compute_roles(&admin, &admin), vec![Role::Admin]);
        assert_eq!(compute_roles(&user, &admin), vec![Role::User]);
    }

    #[test]
    fn test_display_name_prefers_name_parts() {
        let google = GoogleClaims {
            sub: "s".to_string(),
            email: Some("g@example.com".to_string()),
            name: Some("Full Name".to_string()),
            given_name: Some("Grace".to_string()),
            family_name: Some("Winters".to_string()),
            picture: None,
        };
        assert_eq!(display_name(&google), "Grace Winters");
    }

    #[test]
    fn test_display_name_falls_back_to_name_claim() {
        let google = GoogleClaims {
            sub: "s".to_string(),
            email: None,
            name: Some("Full Name".to_string()),
            given_name: None,
            family_name: None,
            picture: None,
        };
        assert_eq!(display_name(&google), "Full Name");
    }
}
