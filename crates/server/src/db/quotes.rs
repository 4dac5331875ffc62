//! Quote repository for database operations.

use sqlx::PgPool;

use iceshopz_core::QuoteId;

use super::RepositoryError;
use crate::models::Quote;

/// Repository for quote database operations.
pub struct QuoteRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> QuoteRepository<'a> {
    /// Create a new quote repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all quotes, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Quote>, RepositoryError> {
        let quotes = sqlx::query_as::<_, Quote>(
            "SELECT id, quote_text, author FROM quotes ORDER BY id DESC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(quotes)
    }

    /// Create a quote.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        quote_text: &str,
        author: Option<&str>,
    ) -> Result<Quote, RepositoryError> {
        let quote = sqlx::query_as::<_, Quote>(
            r"
            INSERT INTO quotes (quote_text, author)
            VALUES ($1, $2)
            RETURNING id, quote_text, author
            ",
        )
        .bind(quote_text)
        .bind(author)
        .fetch_one(self.pool)
        .await?;

        Ok(quote)
    }

    /// Replace a quote's text and author. Returns `None` if it does not
    /// exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn update(
        &self,
        id: QuoteId,
        quote_text: &str,
        author: Option<&str>,
    ) -> Result<Option<Quote>, RepositoryError> {
        let quote = sqlx::query_as::<_, Quote>(
            r"
            UPDATE quotes
            SET quote_text = $1, author = $2
            WHERE id = $3
            RETURNING id, quote_text, author
            ",
        )
        .bind(quote_text)
        .bind(author)
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(quote)
    }

    /// Delete a quote. Returns `true` if a row was deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn delete(&self, id: QuoteId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM quotes WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count all quotes. Used by seeding.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM quotes")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}
