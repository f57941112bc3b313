//! Access guard: session authentication and role authorization.
//!
//! Two independent checks composed per router:
//!
//! - [`authenticate`] requires a valid bearer session token on every
//!   non-read request and attaches the decoded claims to the request.
//!   Read-only requests bypass it entirely: anyone can read records, only
//!   authenticated admins can mutate them. That asymmetry is intentional.
//! - [`authorize`] consults a static route-to-roles table and rejects
//!   callers whose claims do not grant a required role. Routes without an
//!   entry always pass.
//!
//! Both are stateless per request; nothing is cached across requests.

use axum::{
    extract::{Request, State},
    http::{Method, header},
    middleware::Next,
    response::Response,
};

use premia_core::Role;

use crate::error::AppError;
use crate::models::SessionClaims;
use crate::services::auth::{AuthError, decode_session_token};
use crate::state::AppState;

/// Required roles per route, keyed by method and path.
///
/// Declarative counterpart of per-route role metadata; the guard consults
/// it with an explicit lookup, no reflection involved.
const ROUTE_ROLES: &[(&Method, &str, &[Role])] = &[
    (&Method::POST, "/billing", &[Role::Admin]),
    (&Method::PUT, "/billing", &[Role::Admin]),
    (&Method::DELETE, "/billing", &[Role::Admin]),
];

/// Look up the roles required for a route, if any are declared.
#[must_use]
pub fn required_roles(method: &Method, path: &str) -> Option<&'static [Role]> {
    ROUTE_ROLES
        .iter()
        .find(|(m, p, _)| *m == method && *p == path)
        .map(|(_, _, roles)| *roles)
}

/// Extract the bearer token from the Authorization header.
fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Require a valid session token on mutating requests.
///
/// # Errors
///
/// Returns 401 via `AppError` when the token is missing, malformed, or
/// invalid; an expired token gets a distinct message.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Reads are open by design.
    if matches!(*request.method(), Method::GET | Method::HEAD) {
        return Ok(next.run(request).await);
    }

    let token = bearer_token(&request).ok_or_else(|| {
        tracing::warn!("authorization header missing or not Bearer");
        AuthError::MissingCredentials
    })?;

    let claims = decode_session_token(token, &state.config().jwt_secret)?;
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}

/// Enforce the role table for the current route.
///
/// # Errors
///
/// Returns 401 via `AppError` when role information is absent entirely and
/// 403 when roles are present but none match.
pub async fn authorize(request: Request, next: Next) -> Result<Response, AppError> {
    let Some(required) = required_roles(request.method(), request.uri().path()) else {
        return Ok(next.run(request).await);
    };

    let claims = request
        .extensions()
        .get::<SessionClaims>()
        .ok_or(AuthError::MissingRoleInfo)?;

    if !claims.has_any_role(required) {
        tracing::warn!(
            email = %claims.email,
            ?required,
            "caller lacks required role"
        );
        return Err(AppError::Forbidden(format!(
            "requires one of: {required:?}"
        )));
    }

    Ok(next.run(request).await)
}
