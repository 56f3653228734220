//! JWT issuance and validation

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::AccountRole;

const ACCESS_TOKEN_TTL_HOURS: i64 = 24;

/// Claims carried by an access token
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: AccountRole,
    pub exp: i64,
}

/// Sign an access token for the given account
pub fn generate_access_token(
    account_id: Uuid,
    role: AccountRole,
    secret: &str,
) -> Result<String, AppError> {
    let claims = Claims {
        sub: account_id,
        role,
        exp: (Utc::now() + Duration::hours(ACCESS_TOKEN_TTL_HOURS)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to sign token: {e}")))
}

/// Validate a token and return its claims
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized("invalid or expired token"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trips() {
        let id = Uuid::new_v4();
        let token = generate_access_token(id, AccountRole::Recycler, "test-secret").unwrap();
        let claims = verify_token(&token, "test-secret").unwrap();
        assert_eq!(claims.sub, id);
        assert_eq!(claims.role, AccountRole::Recycler);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token =
            generate_access_token(Uuid::new_v4(), AccountRole::Admin, "test-secret").unwrap();
        assert!(verify_token(&token, "other-secret").is_err());
    }
}
