//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side failures to
//! Sentry before responding to the client. All route handlers and middleware
//! return `Result<T, AppError>`.
//!
//! Taxonomy on the wire: 400 validation, 401 authentication (with a
//! distinct expired message), 403 authorization, 404 not found, 500 for
//! storage and internal failures (details never leaked).

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::services::billing::BillingError;

/// Application-level error type for the portal.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication operation failed.
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    /// Valid credential, insufficient role.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Billing operation failed.
    #[error("billing error: {0}")]
    Billing(#[from] BillingError),

    /// Malformed request payload.
    #[error("bad request: {0}")]
    Validation(String),

    /// Database operation failed.
    #[error("database error: {0}")]
    Database(#[from] RepositoryError),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Whether this error is a server-side failure worth capturing.
    const fn is_server_error(&self) -> bool {
        match self {
            Self::Database(_) | Self::Internal(_) => true,
            Self::Auth(err) => matches!(
                err,
                AuthError::ClientIdMissing | AuthError::TokenSigning(_) | AuthError::Repository(_)
            ),
            Self::Billing(err) => matches!(err, BillingError::Repository(_)),
            Self::Forbidden(_) | Self::Validation(_) => false,
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Auth(err) => match err {
                AuthError::ClientIdMissing
                | AuthError::TokenSigning(_)
                | AuthError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
                _ => StatusCode::UNAUTHORIZED,
            },
            Self::Billing(err) => match err {
                BillingError::Validation(_) => StatusCode::BAD_REQUEST,
                BillingError::NotFound(_) => StatusCode::NOT_FOUND,
                BillingError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Client-facing message. Internal details are never exposed.
    fn message(&self) -> String {
        match self {
            Self::Database(_) | Self::Internal(_) => "Internal server error".to_string(),
            Self::Auth(err) => match err {
                AuthError::ClientIdMissing
                | AuthError::TokenSigning(_)
                | AuthError::Repository(_) => "Internal server error".to_string(),
                AuthError::JwksFetch(_)
                | AuthError::UnknownSigningKey
                | AuthError::InvalidGoogleToken(_) => "Invalid Google token".to_string(),
                AuthError::MissingEmail | AuthError::InvalidEmail(_) => {
                    "Email not found in Google payload".to_string()
                }
                AuthError::MissingCredentials => {
                    "Invalid or missing Bearer token in Authorization header".to_string()
                }
                AuthError::InvalidSessionToken => "Invalid session token".to_string(),
                AuthError::SessionExpired => "Session token expired".to_string(),
                AuthError::MissingRoleInfo => {
                    "User role information not found in token".to_string()
                }
            },
            Self::Billing(err) => match err {
                BillingError::Repository(_) => "Internal server error".to_string(),
                other => other.to_string(),
            },
            Self::Forbidden(_) => "Insufficient permissions".to_string(),
            Self::Validation(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry; client errors are just traced.
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        let status = self.status();
        let body = Json(json!({ "error": self.message() }));
        (status, body).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
