//! Idempotent database seeding.
//!
//! Mirrors what operators expect from a fresh install: a known admin
//! account, a starter catalog, and some storefront content. Safe to run
//! repeatedly: the admin account is upserted, and catalog/content inserts
//! only happen while the respective tables are empty.

use sqlx::PgPool;
use thiserror::Error;

use iceshopz_core::{Cents, Email};

use super::{AdRepository, ProductRepository, QuoteRepository, RepositoryError, UserRepository};
use crate::services::auth::hash_password;

/// Email of the seeded admin account.
pub const ADMIN_EMAIL: &str = "admin@example.com";

/// Starter categories.
const CATEGORIES: &[&str] = &["Cones", "Cups", "Sundaes", "Shakes", "Kids Specials"];

/// Starter products: name, description, price in paise, image, stock,
/// category name.
const PRODUCTS: &[(&str, &str, i64, &str, i32, &str)] = &[
    (
        "Rainbow Cone",
        "Vanilla scoop with rainbow sprinkles.",
        8000,
        "https://picsum.photos/seed/rainbowcone/640/480",
        30,
        "Cones",
    ),
    (
        "Choco Blast Cup",
        "Rich chocolate with choco chips.",
        9000,
        "https://picsum.photos/seed/chococup/640/480",
        25,
        "Cups",
    ),
    (
        "Strawberry Sundae",
        "Strawberry swirl with whipped cream.",
        12_000,
        "https://picsum.photos/seed/sundae/640/480",
        20,
        "Sundaes",
    ),
    (
        "Mango Shake",
        "Creamy mango shake with sprinkles.",
        11_000,
        "https://picsum.photos/seed/mangoshake/640/480",
        18,
        "Shakes",
    ),
    (
        "Kids Candy Pop",
        "Mini cone topped with candy hearts.",
        7000,
        "https://picsum.photos/seed/candycone/640/480",
        40,
        "Kids Specials",
    ),
];

/// Errors that can occur during seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("failed to hash admin password")]
    PasswordHash,
}

/// Seed the database.
///
/// # Errors
///
/// Returns `SeedError` if any statement fails; the product batch is
/// transactional so the catalog is inserted fully or not at all.
pub async fn run(pool: &PgPool, admin_password: &str) -> Result<(), SeedError> {
    seed_admin(pool, admin_password).await?;
    seed_catalog(pool).await?;
    seed_content(pool).await?;
    Ok(())
}

/// Upsert the admin account with a fresh password hash.
async fn seed_admin(pool: &PgPool, admin_password: &str) -> Result<(), SeedError> {
    let email = Email::parse(ADMIN_EMAIL)
        .map_err(|e| RepositoryError::DataCorruption(format!("bad seed email: {e}")))?;
    let hash = hash_password(admin_password).map_err(|_| SeedError::PasswordHash)?;

    let users = UserRepository::new(pool);
    let admin = users.upsert_admin("Admin", &email, &hash).await?;
    tracing::info!(user_id = %admin.id, "Seeded admin account");

    Ok(())
}

/// Insert the starter categories and products, only while the product
/// table is empty.
async fn seed_catalog(pool: &PgPool) -> Result<(), SeedError> {
    let products = ProductRepository::new(pool);
    if products.count().await? > 0 {
        return Ok(());
    }

    for name in CATEGORIES {
        sqlx::query("INSERT INTO categories (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
            .bind(name)
            .execute(pool)
            .await?;
    }

    let categories: Vec<(i32, String)> = sqlx::query_as("SELECT id, name FROM categories")
        .fetch_all(pool)
        .await?;
    let category_id = |name: &str| {
        categories
            .iter()
            .find(|(_, n)| n == name)
            .map(|(id, _)| *id)
    };

    let mut tx = pool.begin().await?;
    for (name, description, price, image, stock, category) in PRODUCTS {
        sqlx::query(
            r"
            INSERT INTO products (name, description, price_cents, image_url, stock, category_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(name)
        .bind(description)
        .bind(Cents::new(*price))
        .bind(image)
        .bind(stock)
        .bind(category_id(category))
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    tracing::info!(products = PRODUCTS.len(), "Seeded starter catalog");
    Ok(())
}

/// Insert starter ads and quotes, only while the tables are empty.
async fn seed_content(pool: &PgPool) -> Result<(), SeedError> {
    let ads = AdRepository::new(pool);
    if ads.count().await? == 0 {
        for (title, image) in [
            (
                "School Holiday Special",
                "https://picsum.photos/seed/icead1/900/420",
            ),
            ("Chocolate Week", "https://picsum.photos/seed/icead2/900/420"),
        ] {
            sqlx::query("INSERT INTO ads (title, image_url, link_url, active) VALUES ($1, $2, NULL, TRUE)")
                .bind(title)
                .bind(image)
                .execute(pool)
                .await?;
        }
        tracing::info!("Seeded storefront ads");
    }

    let quotes = QuoteRepository::new(pool);
    if quotes.count().await? == 0 {
        for text in [
            "Life is better with extra sprinkles.",
            "Happiness is a double scoop.",
        ] {
            quotes.create(text, Some("CJ Ice Shopz")).await?;
        }
        tracing::info!("Seeded storefront quotes");
    }

    Ok(())
}
