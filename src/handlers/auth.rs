//! Authentication handlers

use axum::{extract::State, Json};
use validator::Validate;

use crate::app_state::AppState;
use crate::error::AppError;
use crate::models::{Account, ApiResponse, LoginRequest, LoginResponse, RegisterRequest};

/// Register a new account
pub async fn register(
    State(app_state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<Account>>, AppError> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let account = app_state.account_service.register(request).await?;

    Ok(Json(ApiResponse::ok(account)))
}

/// Log in with phone + password
pub async fn login(
    State(app_state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    let response = app_state
        .account_service
        .login(&request.phone, &request.password)
        .await?;

    Ok(Json(ApiResponse::ok(response)))
}
