//! Billing record domain type.

use premia_core::RecordId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A customer billing row (table `billing_record`).
///
/// Every field except `id` and `premium_paid` is nullable; `product_id` is
/// nominally unique per plan but nothing enforces it at the data layer, so
/// lookups keyed on it take the first match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct BillingRecord {
    /// Database-generated identifier, immutable once assigned.
    pub id: RecordId,
    /// Product/plan code this row bills against.
    pub product_id: Option<String>,
    /// Location tied to this billing entry.
    pub location: Option<String>,
    /// Premium paid, non-negative with two fractional digits.
    pub premium_paid: Decimal,
    /// Customer first name.
    pub first_name: Option<String>,
    /// Customer last name.
    pub last_name: Option<String>,
    /// Customer email address.
    pub email: Option<String>,
    /// URL or path to a photo, at most 2048 characters.
    pub photo: Option<String>,
}

/// Maximum length of the `photo` column.
pub const PHOTO_MAX_LENGTH: usize = 2048;
