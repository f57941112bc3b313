//! Billing route handlers.
//!
//! Thin JSON boundary over [`BillingService`]; mutation routes sit behind
//! the access guard configured in `routes::billing_routes`.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::db::billing::BillingFilter;
use crate::error::AppError;
use crate::models::BillingRecord;
use crate::services::billing::{BillingDraft, BillingPatch, BillingService};
use crate::state::AppState;

/// Query parameters of `GET /billing`.
#[derive(Debug, Default, Deserialize)]
pub struct BillingQuery {
    pub product_id: Option<String>,
    pub location: Option<String>,
}

/// Body of `POST /billing`.
///
/// Every field is optional at the JSON boundary; which ones are required
/// is a validation concern, so a missing `product_id` gets the same 400
/// treatment as an empty one instead of a body-shape error.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateBillingRequest {
    pub product_id: Option<String>,
    pub location: Option<String>,
    pub premium_paid: Option<Decimal>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub photo: Option<String>,
}

/// Body of `PUT /billing`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateBillingRequest {
    pub location: Option<String>,
    pub premium_paid: Option<Decimal>,
}

/// Query parameter identifying the record for update/delete.
#[derive(Debug, Deserialize)]
pub struct ProductIdQuery {
    pub product_id: String,
}

/// List billing records, optionally filtered by product id and location.
///
/// # Errors
///
/// Returns 500 if the query fails.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<BillingQuery>,
) -> Result<Json<Vec<BillingRecord>>, AppError> {
    let filter = BillingFilter {
        product_id: query.product_id,
        location: query.location,
    };

    let records = BillingService::new(state.pool()).list(&filter).await?;
    Ok(Json(records))
}

/// Create a billing record.
///
/// # Errors
///
/// Returns 400 if validation fails and 500 if the insert fails.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateBillingRequest>,
) -> Result<(StatusCode, Json<BillingRecord>), AppError> {
    let draft = BillingDraft {
        product_id: body.product_id,
        location: body.location,
        premium_paid: body.premium_paid,
        first_name: body.first_name,
        last_name: body.last_name,
        email: body.email,
        photo: body.photo,
    };

    let record = BillingService::new(state.pool()).create(draft).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Update the record identified by `?product_id=`.
///
/// # Errors
///
/// Returns 404 if no record matches, 400 for an invalid patch, and 500 if
/// persistence fails.
pub async fn update(
    State(state): State<AppState>,
    Query(query): Query<ProductIdQuery>,
    Json(body): Json<UpdateBillingRequest>,
) -> Result<Json<BillingRecord>, AppError> {
    let patch = BillingPatch {
        location: body.location,
        premium_paid: body.premium_paid,
    };

    let record = BillingService::new(state.pool())
        .update(&query.product_id, patch)
        .await?;
    Ok(Json(record))
}

/// Delete every record matching `?product_id=`.
///
/// # Errors
///
/// Returns 404 if nothing matched and 500 if the delete fails.
pub async fn remove(
    State(state): State<AppState>,
    Query(query): Query<ProductIdQuery>,
) -> Result<StatusCode, AppError> {
    BillingService::new(state.pool())
        .remove(&query.product_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
