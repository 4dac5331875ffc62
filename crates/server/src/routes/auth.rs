//! Authentication route handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::db::users::UserRepository;
use crate::error::{AppError, Result};
use crate::middleware::CurrentUser;
use crate::models::User;
use crate::services::AuthService;
use crate::state::AppState;

/// Registration payload.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login payload.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Issued bearer token. Account details are served by `GET /api/auth/me`.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
}

/// `POST /api/auth/register`
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Name is required".to_owned()));
    }

    let service = AuthService::new(state.pool(), state.encoding_key(), state.decoding_key());
    let (user, token) = service.register(name, &body.email, &body.password).await?;

    tracing::info!(user_id = %user.id, "Account registered");

    Ok((StatusCode::CREATED, Json(AuthResponse { token })))
}

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let service = AuthService::new(state.pool(), state.encoding_key(), state.decoding_key());
    let (_user, token) = service.login(&body.email, &body.password).await?;

    Ok(Json(AuthResponse { token }))
}

/// `GET /api/auth/me`
pub async fn me(State(state): State<AppState>, current: CurrentUser) -> Result<Json<User>> {
    let user = UserRepository::new(state.pool())
        .get_by_id(current.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_owned()))?;

    Ok(Json(user))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_response_carries_only_the_token() {
        let json = serde_json::to_value(AuthResponse {
            token: "abc".to_string(),
        })
        .expect("serialize");
        assert_eq!(json, serde_json::json!({ "token": "abc" }));
    }
}
