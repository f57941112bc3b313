//! Google ID-token verification.
//!
//! Verifies tokens the browser obtained from Google Sign-In: RS256 signature
//! against Google's published JWKS, audience equal to our OAuth client id,
//! and issuer pinned to Google. Nothing here touches the database.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use serde::Deserialize;

use super::auth::AuthError;

/// Google's JWKS endpoint for ID-token signing keys.
const GOOGLE_JWKS_URL: &str = "https://www.googleapis.com/oauth2/v3/certs";

/// Issuer values Google uses in ID tokens.
const GOOGLE_ISSUERS: [&str; 2] = ["accounts.google.com", "https://accounts.google.com"];

/// Identity claims extracted from a verified Google ID token.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleClaims {
    /// Google's stable subject identifier for the account.
    pub sub: String,
    /// Account email; absent for tokens issued without the email scope.
    pub email: Option<String>,
    /// Display name.
    pub name: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    /// Profile picture URL.
    pub picture: Option<String>,
}

/// A JSON Web Key as published in Google's JWKS document.
#[derive(Debug, Clone, Deserialize)]
struct Jwk {
    kid: String,
    n: String,
    e: String,
}

#[derive(Debug, Deserialize)]
struct JwkSet {
    keys: Vec<Jwk>,
}

/// Verifier for Google-issued ID tokens.
pub struct GoogleVerifier {
    client_id: String,
    http: reqwest::Client,
}

impl GoogleVerifier {
    /// Create a verifier bound to our OAuth client id.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::ClientIdMissing` if the client id is empty, so a
    /// misconfigured deployment fails at startup rather than on first login.
    pub fn new(client_id: &str, http: reqwest::Client) -> Result<Self, AuthError> {
        if client_id.is_empty() {
            return Err(AuthError::ClientIdMissing);
        }
        Ok(Self {
            client_id: client_id.to_owned(),
            http,
        })
    }

    /// Verify an ID token and return its identity claims.
    ///
    /// Keys are fetched per verification; logins are rare enough that a key
    /// cache is not worth the staleness handling.
    ///
    /// # Errors
    ///
    /// Returns an `AuthError` if the token is malformed, the signature is
    /// invalid, the audience or issuer mismatches, or Google's key endpoint
    /// cannot be reached.
    pub async fn verify(&self, id_token: &str) -> Result<GoogleClaims, AuthError> {
        let header = decode_header(id_token).map_err(AuthError::InvalidGoogleToken)?;
        let kid = header.kid.ok_or(AuthError::UnknownSigningKey)?;

        let jwks: JwkSet = self
            .http
            .get(GOOGLE_JWKS_URL)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let jwk = jwks
            .keys
            .iter()
            .find(|key| key.kid == kid)
            .ok_or(AuthError::UnknownSigningKey)?;

        let decoding_key = DecodingKey::from_rsa_components(&jwk.n, &jwk.e)
            .map_err(AuthError::InvalidGoogleToken)?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[self.client_id.as_str()]);
        validation.set_issuer(&GOOGLE_ISSUERS);

        let data = decode::<GoogleClaims>(id_token, &decoding_key, &validation)
            .map_err(AuthError::InvalidGoogleToken)?;

        tracing::info!(sub = %data.claims.sub, "google token verified");
        Ok(data.claims)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty_client_id() {
        let result = GoogleVerifier::new("", reqwest::Client::new());
        assert!(matches!(result, Err(AuthError::ClientIdMissing)));
    }

    #[test]
    fn test_new_accepts_client_id() {
        let result = GoogleVerifier::new("abc.apps.googleusercontent.com", reqwest::Client::new());
        assert!(result.is_ok());
    }

    #[test]
    fn test_jwks_parsing() {
        let json = r#"{
            "keys": [
                {"kty": "RSA", "alg": "RS256", "use": "sig",
                 "kid": "k1", "n": "abc", "e": "AQAB"},
                {"kty": "RSA", "alg": "RS256", "use": "sig",
                 "kid": "k2", "n": "def", "e": "AQAB"}
            ]
        }"#;

        let set: JwkSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.keys.len(), 2);
        let key = set.keys.iter().find(|k| k.kid == "k2").unwrap();
        assert_eq!(key.n, "def");
    }

    #[tokio::test]
    async fn test_verify_rejects_garbage_token() {
        let verifier =
            GoogleVerifier::new("abc.apps.googleusercontent.com", reqwest::Client::new()).unwrap();
        // Not even a JWT; fails at header decoding, before any network call.
        let result = verifier.verify("not-a-token").await;
        assert!(matches!(result, Err(AuthError::InvalidGoogleToken(_))));
    }
}
