//! Authentication service.
//!
//! Handles registration, password login, and stateless bearer tokens.
//! Tokens are signed JWTs carrying the user id and role; no session state
//! is kept server-side.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use thiserror::Error;

use iceshopz_core::{Email, Role, UserId};

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::User;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Token lifetime. Clients re-authenticate after this elapses.
const TOKEN_TTL_DAYS: i64 = 7;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] iceshopz_core::EmailError),

    /// Invalid credentials (wrong password or user not found).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Bearer token missing, malformed, expired, or signed with the wrong key.
    #[error("invalid token")]
    InvalidToken,

    /// User already exists.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// Token could not be signed.
    #[error("token creation error")]
    TokenCreation,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Claims embedded in a bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: i32,
    /// Role at the time of issue.
    pub role: Role,
    /// Issued-at, seconds since epoch.
    pub iat: i64,
    /// Expiry, seconds since epoch.
    pub exp: i64,
}

impl Claims {
    /// The user id these claims were issued for.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        UserId::new(self.sub)
    }
}

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    encoding_key: &'a EncodingKey,
    decoding_key: &'a DecodingKey,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(
        pool: &'a PgPool,
        encoding_key: &'a EncodingKey,
        decoding_key: &'a DecodingKey,
    ) -> Self {
        Self {
            users: UserRepository::new(pool),
            encoding_key,
            decoding_key,
        }
    }

    /// Register a new user and issue a token for them.
    ///
    /// New accounts always get the `user` role; admin accounts are only
    /// created through seeding.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakPassword` if the password doesn't meet requirements.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(User, String), AuthError> {
        let email = Email::parse(email)?;
        validate_password(password)?;
        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create(name, &email, &password_hash, Role::User)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        let token = self.sign_token(&user)?;
        Ok((user, token))
    }

    /// Login with email and password, issuing a fresh token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String), AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let (user, password_hash) = self
            .users
            .get_auth_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        let token = self.sign_token(&user)?;
        Ok((user, token))
    }

    /// Sign a token for a user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenCreation` if signing fails.
    pub fn sign_token(&self, user: &User) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.as_i32(),
            role: user.role,
            iat: now.timestamp(),
            exp: (now + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
        };

        jsonwebtoken::encode(&Header::default(), &claims, self.encoding_key)
            .map_err(|_| AuthError::TokenCreation)
    }

    /// Verify a bearer token and return its claims.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` for any malformed, expired, or
    /// tampered token.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        verify_token(token, self.decoding_key)
    }
}

/// Verify a bearer token against a decoding key.
///
/// Free function so extractors can verify without constructing a service.
///
/// # Errors
///
/// Returns `AuthError::InvalidToken` for any malformed, expired, or
/// tampered token.
pub fn verify_token(token: &str, decoding_key: &DecodingKey) -> Result<Claims, AuthError> {
    jsonwebtoken::decode::<Claims>(token, decoding_key, &Validation::default())
        .map(|data| data.claims)
        .map_err(|_| AuthError::InvalidToken)
}

/// Validate password strength.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_password() {
        assert!(validate_password("longenough").is_ok());
        assert!(matches!(
            validate_password("short"),
            Err(AuthError::WeakPassword(_))
        ));
    }

    #[test]
    fn test_hash_and_verify_password() {
        let hash = hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("correct horse", &hash).is_ok());
        assert!(matches!(
            verify_password("battery staple", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_token_roundtrip() {
        let encoding = EncodingKey::from_secret(b"test-secret-with-enough-length!!");
        let decoding = DecodingKey::from_secret(b"test-secret-with-enough-length!!");

        let now = Utc::now();
        let claims = Claims {
            sub: 42,
            role: Role::Admin,
            iat: now.timestamp(),
            exp: (now + Duration::days(1)).timestamp(),
        };
        let token = jsonwebtoken::encode(&Header::default(), &claims, &encoding).unwrap();

        let decoded = verify_token(&token, &decoding).unwrap();
        assert_eq!(decoded.sub, 42);
        assert_eq!(decoded.role, Role::Admin);
        assert_eq!(decoded.user_id(), UserId::new(42));
    }

    #[test]
    fn test_token_rejects_wrong_key() {
        let encoding = EncodingKey::from_secret(b"test-secret-with-enough-length!!");
        let other = DecodingKey::from_secret(b"a-completely-different-secret!!!");

        let now = Utc::now();
        let claims = Claims {
            sub: 1,
            role: Role::User,
            iat: now.timestamp(),
            exp: (now + Duration::days(1)).timestamp(),
        };
        let token = jsonwebtoken::encode(&Header::default(), &claims, &encoding).unwrap();

        assert!(matches!(
            verify_token(&token, &other),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_token_rejects_expired() {
        let encoding = EncodingKey::from_secret(b"test-secret-with-enough-length!!");
        let decoding = DecodingKey::from_secret(b"test-secret-with-enough-length!!");

        let now = Utc::now();
        let claims = Claims {
            sub: 1,
            role: Role::User,
            iat: (now - Duration::days(8)).timestamp(),
            exp: (now - Duration::days(1)).timestamp(),
        };
        let token = jsonwebtoken::encode(&Header::default(), &claims, &encoding).unwrap();

        assert!(matches!(
            verify_token(&token, &decoding),
            Err(AuthError::InvalidToken)
        ));
    }
}
