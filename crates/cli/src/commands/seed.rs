//! Database seeding command.

use iceshopz_server::db::{create_pool, seed};

use super::{CommandError, database_url};

/// Development default for the seeded admin password.
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Seed the database with the admin account and starter data.
///
/// The admin password comes from the `--admin-password` flag, the
/// `ICESHOPZ_ADMIN_PASSWORD` environment variable, or a development
/// default, in that order.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or seeding fails.
pub async fn run(admin_password: Option<String>) -> Result<(), CommandError> {
    let database_url = database_url()?;

    let password = admin_password
        .or_else(|| std::env::var("ICESHOPZ_ADMIN_PASSWORD").ok())
        .unwrap_or_else(|| {
            tracing::warn!(
                "Using the development default admin password; set \
                 ICESHOPZ_ADMIN_PASSWORD for anything beyond local use"
            );
            DEFAULT_ADMIN_PASSWORD.to_string()
        });

    tracing::info!("Connecting to database...");
    let pool = create_pool(&database_url).await?;

    tracing::info!("Seeding database...");
    seed::run(&pool, &password).await?;

    tracing::info!("Seed complete: admin account is {}", seed::ADMIN_EMAIL);
    Ok(())
}
