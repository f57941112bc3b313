//! HTTP route handlers for the portal.
//!
//! # Route Structure
//!
//! ```text
//! POST   /auth/google   - Exchange a Google ID token for a session token
//!
//! GET    /billing       - List records (open; ?product_id=&location=)
//! POST   /billing       - Create record (session + admin)
//! PUT    /billing       - Update record (session + admin; ?product_id=)
//! DELETE /billing       - Delete record (session + admin; ?product_id=)
//!
//! GET    /health        - Liveness
//! GET    /health/ready  - Readiness (checks database)
//! ```

pub mod auth;
pub mod billing;

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};

use crate::middleware::{authenticate, authorize};
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/auth/google", post(auth::google_login))
}

/// Create the billing routes router with the access guard applied.
///
/// Layer order matters: `authenticate` wraps `authorize`, so mutating
/// requests are authenticated before their roles are checked.
pub fn billing_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/billing",
            get(billing::list)
                .post(billing::create)
                .put(billing::update)
                .delete(billing::remove),
        )
        .layer(from_fn(authorize))
        .layer(from_fn_with_state(state.clone(), authenticate))
}

/// Create all routes for the portal.
pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(billing_routes(state))
}
