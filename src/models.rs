//! Data models for the GreenCycle backend

use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::Validate;

/// Account model, one row per registered actor
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: AccountRole,
    pub wallet: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account roles
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "account_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    User,
    Transporter,
    Recycler,
    Admin,
}

/// Collection model, one waste-pickup event
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Collection {
    pub id: Uuid,
    pub user_id: Uuid,
    pub transporter_id: Uuid,
    pub recycler_id: Option<Uuid>, // set once a recycler claims the pickup
    pub reference_code: String,
    pub weight: f64,
    pub wet: f64,
    pub dry: f64,
    pub hazardous: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub status: CollectionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Collection status, advances forward only
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "collection_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CollectionStatus {
    Collected,
    TrashDumped,
    Completed,
}

/// Revenue request model, one payout proposal
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct RevenueRequest {
    pub id: Uuid,
    pub recycler_id: Uuid,
    pub price_wet: f64,
    pub price_dry: f64,
    pub price_hazardous: f64,
    pub total_revenue: f64,
    pub total_user_share: Option<f64>,
    pub total_transporter_share: Option<f64>,
    pub municipality_share: Option<f64>,
    pub central_gov_share: Option<f64>,
    pub recycler_share: Option<f64>,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Revenue request status, write-once from Pending to a terminal value
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "request_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Declined,
}

/// Per-category unit prices submitted with a revenue request
#[derive(Debug, Serialize, Deserialize, Validate, Clone, Copy)]
pub struct WastePrices {
    #[validate(range(min = 0.0, message = "wet price must not be negative"))]
    pub wet: f64,
    #[validate(range(min = 0.0, message = "dry price must not be negative"))]
    pub dry: f64,
    #[validate(range(min = 0.0, message = "hazardous price must not be negative"))]
    pub hazardous: f64,
}

/// Registration request payload
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 4, message = "phone is required"))]
    pub phone: String,
    #[validate(email(message = "email is invalid"))]
    pub email: Option<String>,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    pub role: AccountRole,
}

/// Login request payload
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub phone: String,
    pub password: String,
}

/// Login response with the signed access token
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub account: Account,
}

/// Pickup creation payload (transporter scan)
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePickupRequest {
    pub user_id: Uuid,
    #[validate(range(min = 0.0, message = "weight must not be negative"))]
    pub weight: f64,
    #[validate(range(min = 0.0, message = "wet weight must not be negative"))]
    pub wet: f64,
    #[validate(range(min = 0.0, message = "dry weight must not be negative"))]
    pub dry: f64,
    #[validate(range(min = 0.0, message = "hazardous weight must not be negative"))]
    pub hazardous: f64,
    pub latitude: f64,
    pub longitude: f64,
}

/// Claim response
#[derive(Debug, Serialize)]
pub struct ClaimResponse {
    pub claimed_count: u64,
}

/// Revenue request submission payload
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitRevenueRequest {
    #[validate(length(min = 1, message = "collection list must not be empty"))]
    pub collection_ids: Vec<Uuid>,
    #[validate]
    pub prices: WastePrices,
}

/// Query parameters for listing revenue requests
#[derive(Debug, Deserialize)]
pub struct ListRevenueRequestsQuery {
    pub status: Option<RequestStatus>,
}

/// Query parameters for listing accounts
#[derive(Debug, Deserialize)]
pub struct ListAccountsQuery {
    pub role: Option<AccountRole>,
}

/// API response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_payload_rejects_empty_collection_list() {
        let payload = SubmitRevenueRequest {
            collection_ids: vec![],
            prices: WastePrices {
                wet: 1.0,
                dry: 1.0,
                hazardous: 1.0,
            },
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn submit_payload_rejects_negative_price() {
        let payload = SubmitRevenueRequest {
            collection_ids: vec![Uuid::new_v4()],
            prices: WastePrices {
                wet: -0.5,
                dry: 1.0,
                hazardous: 1.0,
            },
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn submit_payload_accepts_zero_prices() {
        let payload = SubmitRevenueRequest {
            collection_ids: vec![Uuid::new_v4()],
            prices: WastePrices {
                wet: 0.0,
                dry: 0.0,
                hazardous: 0.0,
            },
        };
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn pickup_payload_rejects_negative_weight() {
        let payload = CreatePickupRequest {
            user_id: Uuid::new_v4(),
            weight: -1.0,
            wet: 0.0,
            dry: 0.0,
            hazardous: 0.0,
            latitude: 12.97,
            longitude: 77.59,
        };
        assert!(payload.validate().is_err());
    }
}
