//! Integration tests for the billing CRUD endpoints.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The portal server running (cargo run -p premia-api)
//! - `PORTAL_JWT_SECRET` matching the server, for the guarded-route tests
//!
//! Run with: cargo test -p premia-integration-tests -- --ignored

use premia_integration_tests::{mint_session_token, portal_base_url};
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

fn unique_product_id() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock before epoch")
        .subsec_nanos();
    format!("it-{}-{nanos}", std::process::id())
}

/// Test helper: create a record via the API, returning its JSON body.
async fn create_test_record(client: &Client, token: &str, product_id: &str) -> Value {
    let base_url = portal_base_url();
    let resp = client
        .post(format!("{base_url}/billing"))
        .bearer_auth(token)
        .json(&json!({
            "product_id": product_id,
            "location": "Mumbai",
            "premium_paid": 150.50,
            "first_name": "Gita",
            "last_name": "Sharma",
            "email": "gita.sharma@example.com"
        }))
        .send()
        .await
        .expect("Failed to create test record");

    assert_eq!(resp.status(), StatusCode::CREATED);
    resp.json().await.expect("Failed to parse created record")
}

/// Test helper: delete the records for a product id, ignoring the outcome.
async fn delete_test_records(client: &Client, token: &str, product_id: &str) {
    let base_url = portal_base_url();
    let _ = client
        .delete(format!("{base_url}/billing?product_id={product_id}"))
        .bearer_auth(token)
        .send()
        .await;
}

// ============================================================================
// Open Read Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running portal server and database"]
async fn test_list_is_open() {
    let base_url = portal_base_url();

    let resp = reqwest::get(format!("{base_url}/billing"))
        .await
        .expect("Failed to list billing records");

    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse list response");
    assert!(body.is_array());
}

#[tokio::test]
#[ignore = "Requires running portal server and database"]
async fn test_list_name_rule() {
    let base_url = portal_base_url();

    let resp = reqwest::get(format!("{base_url}/billing"))
        .await
        .expect("Failed to list billing records");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse list response");

    // Every returned record has a first name starting with G or a last
    // name starting with W
    for record in body.as_array().expect("list should be an array") {
        let first = record
            .get("first_name")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let last = record
            .get("last_name")
            .and_then(Value::as_str)
            .unwrap_or_default();
        assert!(
            first.starts_with('G') || last.starts_with('W'),
            "Unexpected record in list: {first} {last}"
        );
    }
}

// ============================================================================
// Access Guard Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running portal server"]
async fn test_create_without_token_is_unauthorized() {
    let client = Client::new();
    let base_url = portal_base_url();

    let resp = client
        .post(format!("{base_url}/billing"))
        .json(&json!({
            "product_id": "it-no-token",
            "location": "Pune",
            "premium_paid": 10
        }))
        .send()
        .await
        .expect("Failed to post billing record");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running portal server and PORTAL_JWT_SECRET"]
async fn test_create_with_user_role_is_forbidden() {
    let Some(token) = mint_session_token(&["user"]) else {
        return; // PORTAL_JWT_SECRET not set
    };

    let client = Client::new();
    let base_url = portal_base_url();

    let resp = client
        .post(format!("{base_url}/billing"))
        .bearer_auth(&token)
        .json(&json!({
            "product_id": "it-user-role",
            "location": "Pune",
            "premium_paid": 10
        }))
        .send()
        .await
        .expect("Failed to post billing record");

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

// ============================================================================
// Admin CRUD Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running portal server, database, and PORTAL_JWT_SECRET"]
async fn test_admin_create_update_delete() {
    let Some(token) = mint_session_token(&["admin"]) else {
        return; // PORTAL_JWT_SECRET not set
    };

    let client = Client::new();
    let base_url = portal_base_url();
    let product_id = unique_product_id();

    // Create
    let created = create_test_record(&client, &token, &product_id).await;
    assert_eq!(
        created.get("product_id").and_then(Value::as_str),
        Some(product_id.as_str())
    );
    assert_eq!(
        created.get("premium_paid").and_then(Value::as_str),
        Some("150.50")
    );

    // Update location and premium
    let resp = client
        .put(format!("{base_url}/billing?product_id={product_id}"))
        .bearer_auth(&token)
        .json(&json!({"location": "Delhi", "premium_paid": 200}))
        .send()
        .await
        .expect("Failed to update record");

    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = resp.json().await.expect("Failed to parse updated record");
    assert_eq!(
        updated.get("location").and_then(Value::as_str),
        Some("Delhi")
    );

    // Delete
    let resp = client
        .delete(format!("{base_url}/billing?product_id={product_id}"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to delete record");

    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // A second delete finds nothing
    let resp = client
        .delete(format!("{base_url}/billing?product_id={product_id}"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to re-delete record");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running portal server, database, and PORTAL_JWT_SECRET"]
async fn test_update_missing_record_is_not_found() {
    let Some(token) = mint_session_token(&["admin"]) else {
        return; // PORTAL_JWT_SECRET not set
    };

    let client = Client::new();
    let base_url = portal_base_url();

    let resp = client
        .put(format!("{base_url}/billing?product_id=it-does-not-exist"))
        .bearer_auth(&token)
        .json(&json!({"location": "Chennai"}))
        .send()
        .await
        .expect("Failed to send update");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running portal server and PORTAL_JWT_SECRET"]
async fn test_create_rejects_missing_fields_as_bad_request() {
    let Some(token) = mint_session_token(&["admin"]) else {
        return; // PORTAL_JWT_SECRET not set
    };

    let client = Client::new();
    let base_url = portal_base_url();

    // An empty body reaches validation and comes back 400 with a field
    // message, not a body-shape error.
    let resp = client
        .post(format!("{base_url}/billing"))
        .bearer_auth(&token)
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to post billing record");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = resp.json().await.expect("Failed to parse error body");
    let message = body
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or_default();
    assert!(
        message.contains("product_id"),
        "Unexpected error message: {message}"
    );
}

#[tokio::test]
#[ignore = "Requires running portal server, database, and PORTAL_JWT_SECRET"]
async fn test_create_rejects_negative_premium() {
    let Some(token) = mint_session_token(&["admin"]) else {
        return; // PORTAL_JWT_SECRET not set
    };

    let client = Client::new();
    let base_url = portal_base_url();
    let product_id = unique_product_id();

    let resp = client
        .post(format!("{base_url}/billing"))
        .bearer_auth(&token)
        .json(&json!({
            "product_id": product_id,
            "location": "Pune",
            "premium_paid": -5
        }))
        .send()
        .await
        .expect("Failed to post billing record");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    delete_test_records(&client, &token, &product_id).await;
}
