//! Account handlers

use axum::{
    extract::{Query, State},
    Json,
};

use crate::app_state::AppState;
use crate::auth::AuthActor;
use crate::error::AppError;
use crate::models::{Account, AccountRole, ApiResponse, ListAccountsQuery};

/// Get the calling actor's own account, wallet balance included
pub async fn get_me(
    State(app_state): State<AppState>,
    actor: AuthActor,
) -> Result<Json<ApiResponse<Account>>, AppError> {
    let account = app_state.account_service.get_account(&actor.id).await?;

    Ok(Json(ApiResponse::ok(account)))
}

/// List accounts with an optional role filter (admin only)
pub async fn list_accounts(
    State(app_state): State<AppState>,
    actor: AuthActor,
    Query(query): Query<ListAccountsQuery>,
) -> Result<Json<ApiResponse<Vec<Account>>>, AppError> {
    actor.require_role(AccountRole::Admin)?;

    let accounts = app_state.account_service.list_accounts(query).await?;

    Ok(Json(ApiResponse::ok(accounts)))
}
