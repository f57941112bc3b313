//! Authentication route handlers.

use axum::{Json, extract::State};
use serde::Deserialize;

use crate::error::AppError;
use crate::services::auth::{AuthService, LoginResponse};
use crate::state::AppState;

/// Body of `POST /auth/google`.
#[derive(Debug, Deserialize)]
pub struct GoogleLoginRequest {
    /// Google ID token obtained by the frontend from Google Sign-In.
    pub token: String,
}

/// Authenticate with a Google ID token.
///
/// Verifies the token against Google's keys, maps the identity to an
/// internal record, and returns the user summary plus a session token for
/// subsequent mutating requests.
///
/// # Errors
///
/// Returns 400 for an empty token and 401 if verification fails.
pub async fn google_login(
    State(state): State<AppState>,
    Json(body): Json<GoogleLoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if body.token.is_empty() {
        return Err(AppError::Validation(
            "token must be a non-empty string".to_owned(),
        ));
    }

    tracing::info!("got a google login request");

    let auth = AuthService::new(state.pool(), state.verifier(), state.config());
    let response = auth.login_with_google(&body.token).await?;

    Ok(Json(response))
}
