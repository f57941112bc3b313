//! Billing record service.
//!
//! Wraps the repository with the portal's business rules: request
//! validation, the legacy list narrowing rule, and not-found semantics for
//! updates and deletes keyed on `product_id`.

use rust_decimal::Decimal;
use sqlx::PgPool;
use thiserror::Error;

use crate::db::billing::{BillingFilter, NewBillingRecord};
use crate::db::{BillingRepository, RepositoryError};
use crate::models::BillingRecord;
use crate::models::billing::PHOTO_MAX_LENGTH;

/// Errors that can occur during billing operations.
#[derive(Debug, Error)]
pub enum BillingError {
    /// Request payload failed validation.
    #[error("validation failed: {0}")]
    Validation(String),

    /// No record matched the given product id.
    #[error("no billing record with product_id {0}")]
    NotFound(String),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Patch accepted by [`BillingService::update`].
///
/// Only `location` and `premium_paid` are mutable; everything else is fixed
/// at creation.
#[derive(Debug, Clone, Default)]
pub struct BillingPatch {
    pub location: Option<String>,
    pub premium_paid: Option<Decimal>,
}

/// Unvalidated fields accepted by [`BillingService::create`].
///
/// Everything is optional at this stage so that absent and
/// present-but-invalid fields fail the same way, as a 400 with a field
/// message rather than a body-shape error at the JSON boundary.
#[derive(Debug, Clone, Default)]
pub struct BillingDraft {
    pub product_id: Option<String>,
    pub location: Option<String>,
    pub premium_paid: Option<Decimal>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub photo: Option<String>,
}

/// Billing record service.
pub struct BillingService<'a> {
    records: BillingRepository<'a>,
}

impl<'a> BillingService<'a> {
    /// Create a new billing service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            records: BillingRepository::new(pool),
        }
    }

    /// List records matching the filter.
    ///
    /// After the database query, rows are narrowed to those whose first
    /// name starts with `G` or last name starts with `W`. This is a legacy
    /// reporting rule inherited from the previous portal; it is case
    /// sensitive and deliberately applied in application code rather than
    /// in the query.
    //
    // TODO: product to confirm the G/W narrowing is still intended; it
    // silently hides every other row from the list view.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::Repository` if the query fails.
    pub async fn list(&self, filter: &BillingFilter) -> Result<Vec<BillingRecord>, BillingError> {
        let records = self.records.list(filter).await?;

        Ok(records
            .into_iter()
            .filter(matches_name_rule)
            .collect())
    }

    /// Create a new record and return it with its generated id.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::Validation` if required fields are missing or
    /// out of range, `BillingError::Repository` if the insert fails.
    pub async fn create(&self, draft: BillingDraft) -> Result<BillingRecord, BillingError> {
        let new = validate_draft(draft)?;

        let record = self.records.insert(&new).await.inspect_err(|e| {
            tracing::error!(error = %e, "error creating billing record");
        })?;

        Ok(record)
    }

    /// Update the record with the given product id.
    ///
    /// Read-then-write: locates the first matching row, shallow-merges the
    /// patch, and persists. Concurrent updates to the same product id race
    /// with last-writer-wins semantics.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::NotFound` if no row matches (nothing is
    /// mutated), `BillingError::Validation` for an out-of-range patch, and
    /// `BillingError::Repository` if a query fails.
    pub async fn update(
        &self,
        product_id: &str,
        patch: BillingPatch,
    ) -> Result<BillingRecord, BillingError> {
        validate_patch(&patch)?;

        let existing = self
            .records
            .find_by_product_id(product_id)
            .await?
            .ok_or_else(|| {
                tracing::warn!(product_id, "record not found for update");
                BillingError::NotFound(product_id.to_owned())
            })?;

        let updated = self
            .records
            .update_fields(existing.id, patch.location.as_deref(), patch.premium_paid)
            .await
            .inspect_err(|e| {
                tracing::error!(error = %e, product_id, "error updating billing record");
            })?;

        tracing::info!(product_id, id = %updated.id, "billing record updated");
        Ok(updated)
    }

    /// Delete every record with the given product id.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::NotFound` if no rows were affected, and
    /// `BillingError::Repository` if the delete fails.
    pub async fn remove(&self, product_id: &str) -> Result<(), BillingError> {
        let affected = self
            .records
            .delete_by_product_id(product_id)
            .await
            .inspect_err(|e| {
                tracing::error!(error = %e, product_id, "error deleting billing record");
            })?;

        if affected == 0 {
            tracing::warn!(product_id, "record not found for deletion");
            return Err(BillingError::NotFound(product_id.to_owned()));
        }

        tracing::info!(product_id, affected, "billing record deleted");
        Ok(())
    }
}

/// The legacy list narrowing rule: first name starting with `G` or last
/// name starting with `W`, case sensitive.
fn matches_name_rule(record: &BillingRecord) -> bool {
    record
        .first_name
        .as_deref()
        .is_some_and(|name| name.starts_with('G'))
        || record
            .last_name
            .as_deref()
            .is_some_and(|name| name.starts_with('W'))
}

/// Validate a draft, producing the insertable record.
fn validate_draft(draft: BillingDraft) -> Result<NewBillingRecord, BillingError> {
    let product_id = draft
        .product_id
        .filter(|product_id| !product_id.is_empty())
        .ok_or_else(|| {
            BillingError::Validation("product_id must be a non-empty string".to_owned())
        })?;
    let location = draft
        .location
        .filter(|location| !location.is_empty())
        .ok_or_else(|| {
            BillingError::Validation("location must be a non-empty string".to_owned())
        })?;
    let premium_paid = draft
        .premium_paid
        .ok_or_else(|| BillingError::Validation("premium_paid is required".to_owned()))?;
    if premium_paid < Decimal::ZERO {
        return Err(BillingError::Validation(
            "premium_paid must not be negative".to_owned(),
        ));
    }
    // Character count, matching the column's VARCHAR semantics; byte length
    // would wrongly reject multi-byte URLs.
    if draft
        .photo
        .as_deref()
        .is_some_and(|photo| photo.chars().count() > PHOTO_MAX_LENGTH)
    {
        return Err(BillingError::Validation(format!(
            "photo must be at most {PHOTO_MAX_LENGTH} characters"
        )));
    }

    Ok(NewBillingRecord {
        product_id,
        location,
        premium_paid,
        first_name: draft.first_name,
        last_name: draft.last_name,
        email: draft.email,
        photo: draft.photo,
    })
}

fn validate_patch(patch: &BillingPatch) -> Result<(), BillingError> {
    if patch.premium_paid.is_some_and(|premium| premium < Decimal::ZERO) {
        return Err(BillingError::Validation(
            "premium_paid must not be negative".to_owned(),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use premia_core::RecordId;

    use super::*;

    fn record(first_name: Option<&str>, last_name: Option<&str>) -> BillingRecord {
        BillingRecord {
            id: RecordId::new(1),
            product_id: Some("P1".to_string()),
            location: Some("NY".to_string()),
            premium_paid: Decimal::new(10000, 2),
            first_name: first_name.map(str::to_owned),
            last_name: last_name.map(str::to_owned),
            email: None,
            photo: None,
        }
    }

    fn draft() -> BillingDraft {
        BillingDraft {
            product_id: Some("P1".to_string()),
            location: Some("NY".to_string()),
            premium_paid: Some(Decimal::new(10000, 2)),
            ..BillingDraft::default()
        }
    }

    #[test]
    fn test_name_rule_keeps_g_first_names() {
        assert!(matches_name_rule(&record(Some("Grace"), Some("Jones"))));
    }

    #[test]
    fn test_name_rule_keeps_w_last_names() {
        assert!(matches_name_rule(&record(Some("Bob"), Some("Winters"))));
    }

    #[test]
    fn test_name_rule_drops_other_names() {
        assert!(!matches_name_rule(&record(Some("Bob"), Some("Jones"))));
        assert!(!matches_name_rule(&record(None, None)));
    }

    #[test]
    fn test_name_rule_is_case_sensitive() {
        assert!(!matches_name_rule(&record(Some("grace"), Some("winters"))));
    }

    #[test]
    fn test_validate_draft_accepts_valid() {
        let new = validate_draft(draft()).unwrap();
        assert_eq!(new.product_id, "P1");
        assert_eq!(new.location, "NY");
        assert_eq!(new.premium_paid, Decimal::new(10000, 2));
    }

    #[test]
    fn test_validate_draft_rejects_missing_fields() {
        // Absent fields fail validation the same way empty ones do.
        for missing in [
            BillingDraft {
                product_id: None,
                ..draft()
            },
            BillingDraft {
                location: None,
                ..draft()
            },
            BillingDraft {
                premium_paid: None,
                ..draft()
            },
        ] {
            assert!(matches!(
                validate_draft(missing),
                Err(BillingError::Validation(_))
            ));
        }
    }

    #[test]
    fn test_validate_draft_rejects_empty_product_id() {
        let mut invalid = draft();
        invalid.product_id = Some(String::new());
        assert!(matches!(
            validate_draft(invalid),
            Err(BillingError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_draft_rejects_empty_location() {
        let mut invalid = draft();
        invalid.location = Some(String::new());
        assert!(matches!(
            validate_draft(invalid),
            Err(BillingError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_draft_rejects_negative_premium() {
        let mut invalid = draft();
        invalid.premium_paid = Some(Decimal::new(-1, 2));
        assert!(matches!(
            validate_draft(invalid),
            Err(BillingError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_draft_rejects_oversized_photo() {
        let mut invalid = draft();
        invalid.photo = Some("x".repeat(PHOTO_MAX_LENGTH + 1));
        assert!(matches!(
            validate_draft(invalid),
            Err(BillingError::Validation(_))
        ));
    }

    #[test]
    fn test_photo_limit_counts_characters_not_bytes() {
        // Two bytes per character in UTF-8; within the character limit.
        let mut multibyte = draft();
        multibyte.photo = Some("é".repeat(PHOTO_MAX_LENGTH));
        assert!(validate_draft(multibyte).is_ok());

        let mut over = draft();
        over.photo = Some("é".repeat(PHOTO_MAX_LENGTH + 1));
        assert!(matches!(
            validate_draft(over),
            Err(BillingError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_patch() {
        assert!(validate_patch(&BillingPatch::default()).is_ok());
        assert!(
            validate_patch(&BillingPatch {
                location: Some("NY".to_string()),
                premium_paid: Some(Decimal::new(15000, 2)),
            })
            .is_ok()
        );
        assert!(matches!(
            validate_patch(&BillingPatch {
                location: None,
                premium_paid: Some(Decimal::new(-100, 2)),
            }),
            Err(BillingError::Validation(_))
        ));
    }
}
