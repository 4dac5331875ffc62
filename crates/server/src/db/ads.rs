//! Ad repository for database operations.

use sqlx::PgPool;

use iceshopz_core::AdId;

use super::RepositoryError;
use crate::models::{Ad, AdPatch, NewAd};

/// Repository for ad database operations.
pub struct AdRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AdRepository<'a> {
    /// Create a new ad repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List active ads, newest first. This is the public storefront view.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_active(&self) -> Result<Vec<Ad>, RepositoryError> {
        let ads = sqlx::query_as::<_, Ad>(
            r"
            SELECT id, title, image_url, link_url, active
            FROM ads
            WHERE active = TRUE
            ORDER BY id DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(ads)
    }

    /// List all ads including inactive ones, newest first. Admin view.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Ad>, RepositoryError> {
        let ads = sqlx::query_as::<_, Ad>(
            "SELECT id, title, image_url, link_url, active FROM ads ORDER BY id DESC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(ads)
    }

    /// Create an ad.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, new: &NewAd) -> Result<Ad, RepositoryError> {
        let ad = sqlx::query_as::<_, Ad>(
            r"
            INSERT INTO ads (title, image_url, link_url, active)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, image_url, link_url, active
            ",
        )
        .bind(&new.title)
        .bind(&new.image_url)
        .bind(new.link_url.as_deref())
        .bind(new.active)
        .fetch_one(self.pool)
        .await?;

        Ok(ad)
    }

    /// Apply a partial update. Returns `None` if the ad does not exist.
    ///
    /// `link_url` uses a two-level option so an explicit `null` clears the
    /// link while an absent field leaves it alone.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn update(&self, id: AdId, patch: &AdPatch) -> Result<Option<Ad>, RepositoryError> {
        let ad = sqlx::query_as::<_, Ad>(
            r"
            UPDATE ads
            SET title = COALESCE($1, title),
                image_url = COALESCE($2, image_url),
                link_url = CASE WHEN $3 THEN $4 ELSE link_url END,
                active = COALESCE($5, active)
            WHERE id = $6
            RETURNING id, title, image_url, link_url, active
            ",
        )
        .bind(patch.title.as_deref())
        .bind(patch.image_url.as_deref())
        .bind(patch.link_url.is_some())
        .bind(patch.link_url.clone().flatten())
        .bind(patch.active)
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(ad)
    }

    /// Delete an ad. Returns `true` if a row was deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn delete(&self, id: AdId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM ads WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count all ads. Used by seeding.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM ads")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}
