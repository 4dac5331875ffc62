//! Unified error handling.
//!
//! Provides a unified `AppError` type rendered as an `{"error": message}`
//! JSON body with the matching status code. All route handlers return
//! `Result<T, AppError>`. Database and internal failures are logged and
//! surface only a generic message to the client.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::services::invoice::InvoiceError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed input from the client.
    #[error("Bad request: {0}")]
    Validation(String),

    /// Missing, invalid, or expired credential.
    #[error("Unauthorized: {0}")]
    Authentication(String),

    /// Valid credential but insufficient privilege or not the resource owner.
    #[error("Forbidden: {0}")]
    Authorization(String),

    /// Referenced entity does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The entity already exists (e.g. duplicate email).
    #[error("Duplicate: {0}")]
    Duplicate(String),

    /// Referential-integrity violation, e.g. deleting a product that has
    /// been ordered. Surfaced with a generic message.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Invoice rendering failed.
    #[error("Invoice error: {0}")]
    Invoice(#[from] InvoiceError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Referential-integrity violations are a client error, not a
        // database failure: keep the repository's message and answer 400.
        let this = match self {
            Self::Database(RepositoryError::Conflict(msg)) => Self::Conflict(msg),
            other => other,
        };
        this.respond()
    }
}

impl AppError {
    fn respond(self) -> Response {
        // Log server-side failures with full detail before redacting
        if matches!(self, Self::Database(_) | Self::Internal(_) | Self::Invoice(_)) {
            tracing::error!(error = %self, "Request error");
        }

        let status = match &self {
            Self::Validation(_) | Self::Conflict(_) => StatusCode::BAD_REQUEST,
            Self::Authentication(_) => StatusCode::UNAUTHORIZED,
            Self::Authorization(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Duplicate(_) => StatusCode::CONFLICT,
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials | AuthError::InvalidToken => {
                    StatusCode::UNAUTHORIZED
                }
                AuthError::UserAlreadyExists => StatusCode::CONFLICT,
                AuthError::InvalidEmail(_) | AuthError::WeakPassword(_) => {
                    StatusCode::BAD_REQUEST
                }
                AuthError::PasswordHash | AuthError::TokenCreation | AuthError::Repository(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Database(_) | Self::Invoice(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Database(_) | Self::Internal(_) | Self::Invoice(_) => {
                "Internal server error".to_string()
            }
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => "Invalid credentials".to_string(),
                AuthError::InvalidToken => "Invalid token".to_string(),
                AuthError::UserAlreadyExists => "Email already in use".to_string(),
                AuthError::InvalidEmail(_) => "Invalid email address".to_string(),
                AuthError::WeakPassword(msg) => msg.clone(),
                AuthError::PasswordHash | AuthError::TokenCreation | AuthError::Repository(_) => {
                    "Internal server error".to_string()
                }
            },
            Self::Validation(msg)
            | Self::Conflict(msg)
            | Self::Authentication(msg)
            | Self::Authorization(msg)
            | Self::NotFound(msg)
            | Self::Duplicate(msg) => msg.clone(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("Order not found".to_string());
        assert_eq!(err.to_string(), "Not found: Order not found");

        let err = AppError::Validation("No items".to_string());
        assert_eq!(err.to_string(), "Bad request: No items");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::Validation("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Authentication("test".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Authorization("test".to_string())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Duplicate("test".to_string())),
            StatusCode::CONFLICT
        );
        // Referential-integrity conflicts surface as a generic 400
        assert_eq!(
            get_status(AppError::Conflict("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        // The same holds when the conflict bubbles up from a repository,
        // e.g. deleting a product that order items still reference
        assert_eq!(
            get_status(AppError::Database(RepositoryError::Conflict(
                "product is referenced by orders".to_string()
            ))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_auth_error_status_codes() {
        assert_eq!(
            get_status(AppError::Auth(AuthError::InvalidCredentials)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Auth(AuthError::UserAlreadyExists)),
            StatusCode::CONFLICT
        );
    }
}
