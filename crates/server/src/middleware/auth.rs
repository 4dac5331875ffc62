//! Bearer-token extractors.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;

use iceshopz_core::{Role, UserId};

use crate::services::auth::{Claims, verify_token};
use crate::state::AppState;

/// Extractor that requires a valid bearer token.
///
/// # Example
///
/// ```rust,ignore
/// async fn my_orders(
///     State(state): State<AppState>,
///     user: CurrentUser,
/// ) -> Result<Json<Vec<OrderWithItems>>> {
///     // user.id, user.role available here
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser {
    pub id: UserId,
    pub role: Role,
}

impl CurrentUser {
    fn from_claims(claims: &Claims) -> Self {
        Self {
            id: claims.user_id(),
            role: claims.role,
        }
    }
}

/// Extractor that requires a valid bearer token carrying the admin role.
///
/// A missing or invalid token rejects with 401; a valid token without the
/// admin role rejects with 403.
#[derive(Debug, Clone, Copy)]
pub struct AdminUser(pub CurrentUser);

/// Rejection for the auth extractors.
#[derive(Debug)]
pub enum AuthRejection {
    /// Missing, malformed, expired, or tampered token.
    Unauthorized,
    /// Valid token, but the role is not allowed.
    Forbidden,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "Invalid token"),
            Self::Forbidden => (StatusCode::FORBIDDEN, "Admin access required"),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = claims_from_parts(parts, state)?;
        Ok(Self::from_claims(&claims))
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = claims_from_parts(parts, state)?;
        if !claims.role.is_admin() {
            return Err(AuthRejection::Forbidden);
        }

        Ok(Self(CurrentUser::from_claims(&claims)))
    }
}

/// Pull and verify the bearer token from the `Authorization` header.
fn claims_from_parts(parts: &Parts, state: &AppState) -> Result<Claims, AuthRejection> {
    let header_value = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthRejection::Unauthorized)?;

    let token = header_value
        .strip_prefix("Bearer ")
        .ok_or(AuthRejection::Unauthorized)?;

    verify_token(token, state.decoding_key()).map_err(|_| AuthRejection::Unauthorized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_status_codes() {
        assert_eq!(
            AuthRejection::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthRejection::Forbidden.into_response().status(),
            StatusCode::FORBIDDEN
        );
    }
}
