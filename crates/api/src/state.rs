//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::PortalConfig;
use crate::services::auth::AuthError;
use crate::services::google::GoogleVerifier;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; provides access to configuration, the
/// database pool, and the Google token verifier.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: PortalConfig,
    pool: PgPool,
    verifier: GoogleVerifier,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::ClientIdMissing` if the configured Google client
    /// id is empty; the service refuses to start rather than failing every
    /// login later.
    pub fn new(config: PortalConfig, pool: PgPool) -> Result<Self, AuthError> {
        let verifier = GoogleVerifier::new(&config.google_client_id, reqwest::Client::new())?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                verifier,
            }),
        })
    }

    /// Get a reference to the portal configuration.
    #[must_use]
    pub fn config(&self) -> &PortalConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the Google token verifier.
    #[must_use]
    pub fn verifier(&self) -> &GoogleVerifier {
        &self.inner.verifier
    }
}
