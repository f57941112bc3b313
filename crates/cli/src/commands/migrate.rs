//! Database migration command.
//!
//! Applies the migrations in `crates/api/migrations/` to the portal
//! database. Migrations are embedded in the binary at compile time, so
//! the CLI can run them from anywhere.

use super::CliError;

/// Run the portal database migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), CliError> {
    let pool = super::connect().await?;

    tracing::info!("Running portal migrations...");
    sqlx::migrate!("../api/migrations").run(&pool).await?;

    tracing::info!("Portal migrations complete!");
    Ok(())
}
