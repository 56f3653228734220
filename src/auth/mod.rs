//! Authentication for the GreenCycle API
//!
//! Phone + password login issuing JWT access tokens, and an extractor
//! that resolves the calling actor from the Authorization header.

mod jwt;

pub use jwt::{generate_access_token, verify_token, Claims};

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use uuid::Uuid;

use crate::app_state::AppState;
use crate::error::AppError;
use crate::models::AccountRole;

/// Authenticated actor resolved from the bearer token
#[derive(Debug, Clone, Copy)]
pub struct AuthActor {
    pub id: Uuid,
    pub role: AccountRole,
}

impl AuthActor {
    pub fn require_role(&self, role: AccountRole) -> Result<(), AppError> {
        if self.role == role {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthActor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::Unauthorized("missing bearer token"))?;

        let claims = verify_token(bearer.token(), &state.config.jwt_secret)?;

        Ok(AuthActor {
            id: claims.sub,
            role: claims.role,
        })
    }
}
