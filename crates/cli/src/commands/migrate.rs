//! Database migration command.
//!
//! Migrations live in `crates/server/migrations/` and are embedded into
//! the binary at compile time, so the CLI can run them from anywhere.

use iceshopz_server::db::create_pool;

use super::{CommandError, database_url};

/// Run the database migrations.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or a migration
/// fails.
pub async fn run() -> Result<(), CommandError> {
    let database_url = database_url()?;

    tracing::info!("Connecting to database...");
    let pool = create_pool(&database_url).await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../server/migrations").run(&pool).await?;

    tracing::info!("Migrations complete");
    Ok(())
}
