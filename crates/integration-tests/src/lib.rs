//! Integration tests for the Premia billing portal.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and apply migrations
//! cargo run -p premia-cli -- migrate
//!
//! # Start the API server
//! cargo run -p premia-api
//!
//! # Run integration tests
//! cargo test -p premia-integration-tests -- --ignored
//! ```
//!
//! Tests talk to a running server over HTTP. The base URL comes from
//! `PORTAL_BASE_URL` (default `http://localhost:3000`). Tests that hit
//! guarded routes mint their own session tokens, which requires
//! `PORTAL_JWT_SECRET` to match the running server.

use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

/// Base URL for the portal API (configurable via environment).
#[must_use]
pub fn portal_base_url() -> String {
    std::env::var("PORTAL_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// The signing secret shared with the server under test, if configured.
#[must_use]
pub fn jwt_secret() -> Option<String> {
    std::env::var("PORTAL_JWT_SECRET").ok()
}

#[derive(Serialize)]
struct TestClaims {
    sub: String,
    email: String,
    roles: Vec<String>,
    exp: u64,
}

/// Mint a session token with the given roles, signed with the shared
/// secret. Returns `None` when `PORTAL_JWT_SECRET` is not set, in which
/// case guarded-route tests should skip.
#[must_use]
pub fn mint_session_token(roles: &[&str]) -> Option<String> {
    let secret = jwt_secret()?;

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_secs();

    let claims = TestClaims {
        sub: "integration-test".to_string(),
        email: "integration-test@example.com".to_string(),
        roles: roles.iter().map(ToString::to_string).collect(),
        exp: now + 600,
    };

    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
    )
    .ok()
}
