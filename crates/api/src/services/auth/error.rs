//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Verifier was constructed without a Google client id.
    #[error("google client id is not configured")]
    ClientIdMissing,

    /// Google's key endpoint could not be reached or returned garbage.
    #[error("could not fetch google signing keys: {0}")]
    JwksFetch(#[from] reqwest::Error),

    /// The token names a signing key Google no longer publishes.
    #[error("google token signed with unknown key")]
    UnknownSigningKey,

    /// The Google ID token is malformed, mis-signed, expired, or issued for
    /// a different audience.
    #[error("invalid google token: {0}")]
    InvalidGoogleToken(#[source] jsonwebtoken::errors::Error),

    /// The verified Google payload carries no email claim.
    #[error("email not found in google payload")]
    MissingEmail,

    /// The email claim is not structurally valid.
    #[error("invalid email in google payload: {0}")]
    InvalidEmail(#[from] premia_core::EmailError),

    /// No bearer token on a request that requires one.
    #[error("missing bearer token")]
    MissingCredentials,

    /// The session token is malformed or its signature does not verify.
    #[error("invalid session token")]
    InvalidSessionToken,

    /// The session token's expiry has passed.
    #[error("session token expired")]
    SessionExpired,

    /// An authenticated request reached a role-gated route without any role
    /// information in its claims.
    #[error("user role information not found in token")]
    MissingRoleInfo,

    /// Signing the session payload failed.
    #[error("could not sign session token: {0}")]
    TokenSigning(#[source] jsonwebtoken::errors::Error),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
