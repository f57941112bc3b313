//! Billing record repository.
//!
//! Pure SQL access to the `billing_record` table. Business rules (field
//! validation, the list narrowing rule) live in the billing service, not
//! here.

use rust_decimal::Decimal;
use sqlx::PgPool;

use premia_core::RecordId;

use super::RepositoryError;
use crate::models::BillingRecord;

/// Exact-match filters for listing billing records.
///
/// Absent fields are unconstrained; present fields are AND-combined.
#[derive(Debug, Clone, Default)]
pub struct BillingFilter {
    pub product_id: Option<String>,
    pub location: Option<String>,
}

/// Field values for a new billing record (id is generated by the database).
#[derive(Debug, Clone)]
pub struct NewBillingRecord {
    pub product_id: String,
    pub location: String,
    pub premium_paid: Decimal,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub photo: Option<String>,
}

/// Repository for billing record database operations.
pub struct BillingRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> BillingRepository<'a> {
    /// Create a new billing repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List records matching the filter, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, filter: &BillingFilter) -> Result<Vec<BillingRecord>, RepositoryError> {
        let records = sqlx::query_as::<_, BillingRecord>(
            r"
            SELECT id, product_id, location, premium_paid,
                   first_name, last_name, email, photo
            FROM billing_record
            WHERE ($1::text IS NULL OR product_id = $1)
              AND ($2::text IS NULL OR location = $2)
            ORDER BY id
            ",
        )
        .bind(filter.product_id.as_deref())
        .bind(filter.location.as_deref())
        .fetch_all(self.pool)
        .await?;

        Ok(records)
    }

    /// Get the first record with the given product id, if any.
    ///
    /// `product_id` carries no uniqueness constraint; ordering by id makes
    /// the first match deterministic.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_product_id(
        &self,
        product_id: &str,
    ) -> Result<Option<BillingRecord>, RepositoryError> {
        let record = sqlx::query_as::<_, BillingRecord>(
            r"
            SELECT id, product_id, location, premium_paid,
                   first_name, last_name, email, photo
            FROM billing_record
            WHERE product_id = $1
            ORDER BY id
            LIMIT 1
            ",
        )
        .bind(product_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(record)
    }

    /// Get the first record with the given email, if any.
    ///
    /// Used by the session issuer to map a verified Google identity to an
    /// internal record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<BillingRecord>, RepositoryError> {
        let record = sqlx::query_as::<_, BillingRecord>(
            r"
            SELECT id, product_id, location, premium_paid,
                   first_name, last_name, email, photo
            FROM billing_record
            WHERE email = $1
            ORDER BY id
            LIMIT 1
            ",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(record)
    }

    /// Insert a new record, returning it with the generated id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(&self, new: &NewBillingRecord) -> Result<BillingRecord, RepositoryError> {
        let record = sqlx::query_as::<_, BillingRecord>(
            r"
            INSERT INTO billing_record
                (product_id, location, premium_paid, first_name, last_name, email, photo)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, product_id, location, premium_paid,
                      first_name, last_name, email, photo
            ",
        )
        .bind(&new.product_id)
        .bind(&new.location)
        .bind(new.premium_paid)
        .bind(new.first_name.as_deref())
        .bind(new.last_name.as_deref())
        .bind(new.email.as_deref())
        .bind(new.photo.as_deref())
        .fetch_one(self.pool)
        .await?;

        Ok(record)
    }

    /// Shallow-merge `location` and `premium_paid` into the row with the
    /// given id, returning the updated row.
    ///
    /// Absent patch fields leave the stored value untouched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails, including
    /// when the row no longer exists (callers resolve the row id first).
    pub async fn update_fields(
        &self,
        id: RecordId,
        location: Option<&str>,
        premium_paid: Option<Decimal>,
    ) -> Result<BillingRecord, RepositoryError> {
        let record = sqlx::query_as::<_, BillingRecord>(
            r"
            UPDATE billing_record
            SET location = COALESCE($2, location),
                premium_paid = COALESCE($3, premium_paid)
            WHERE id = $1
            RETURNING id, product_id, location, premium_paid,
                      first_name, last_name, email, photo
            ",
        )
        .bind(id)
        .bind(location)
        .bind(premium_paid)
        .fetch_one(self.pool)
        .await?;

        Ok(record)
    }

    /// Delete every row with the given product id, returning the number of
    /// rows removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete_by_product_id(&self, product_id: &str) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM billing_record WHERE product_id = $1")
            .bind(product_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
