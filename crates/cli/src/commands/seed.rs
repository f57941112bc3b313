//! Seed the billing table with sample records.
//!
//! Useful for local development and for exercising the API by hand. The
//! sample set includes names that match the list post-filter and names
//! that do not, so `GET /billing` behavior is easy to inspect.

use rust_decimal::Decimal;
use tracing::info;

use super::CliError;

struct SeedRecord {
    product_id: &'static str,
    location: &'static str,
    premium_paid: Decimal,
    first_name: &'static str,
    last_name: &'static str,
    email: &'static str,
}

fn sample_records() -> Vec<SeedRecord> {
    vec![
        SeedRecord {
            product_id: "PRD-1001",
            location: "Mumbai",
            premium_paid: Decimal::new(125_050, 2),
            first_name: "Gita",
            last_name: "Sharma",
            email: "gita.sharma@example.com",
        },
        SeedRecord {
            product_id: "PRD-1002",
            location: "Pune",
            premium_paid: Decimal::new(98_000, 2),
            first_name: "Arjun",
            last_name: "Wadia",
            email: "arjun.wadia@example.com",
        },
        SeedRecord {
            product_id: "PRD-1003",
            location: "Delhi",
            premium_paid: Decimal::new(45_075, 2),
            first_name: "Priya",
            last_name: "Nair",
            email: "priya.nair@example.com",
        },
        SeedRecord {
            product_id: "PRD-1004",
            location: "Chennai",
            premium_paid: Decimal::new(210_000, 2),
            first_name: "George",
            last_name: "Mathew",
            email: "george.mathew@example.com",
        },
        SeedRecord {
            product_id: "PRD-1005",
            location: "Bengaluru",
            premium_paid: Decimal::new(67_025, 2),
            first_name: "Sunil",
            last_name: "Rao",
            email: "sunil.rao@example.com",
        },
    ]
}

/// Insert the sample records into the billing table.
///
/// With `clear` set, existing rows are deleted first so the table ends up
/// containing exactly the sample set.
///
/// # Errors
///
/// Returns an error if the database is unreachable or an insert fails.
pub async fn run(clear: bool) -> Result<(), CliError> {
    let pool = super::connect().await?;

    if clear {
        let deleted = sqlx::query("DELETE FROM billing_record")
            .execute(&pool)
            .await?
            .rows_affected();
        info!(deleted, "Cleared existing billing records");
    }

    let records = sample_records();
    let count = records.len();

    for record in records {
        sqlx::query(
            r"
            INSERT INTO billing_record
                (product_id, location, premium_paid, first_name, last_name, email)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(record.product_id)
        .bind(record.location)
        .bind(record.premium_paid)
        .bind(record.first_name)
        .bind(record.last_name)
        .bind(record.email)
        .execute(&pool)
        .await?;
    }

    info!(count, "Seeding complete!");
    Ok(())
}
