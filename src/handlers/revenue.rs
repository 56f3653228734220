//! Revenue request handlers: submission, admin review, approval, decline

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::auth::AuthActor;
use crate::error::AppError;
use crate::models::{
    AccountRole, ApiResponse, ListRevenueRequestsQuery, RevenueRequest, SubmitRevenueRequest,
};

/// Submit a payout proposal (recycler only)
pub async fn submit_revenue_request(
    State(app_state): State<AppState>,
    actor: AuthActor,
    Json(request): Json<SubmitRevenueRequest>,
) -> Result<Json<ApiResponse<RevenueRequest>>, AppError> {
    actor.require_role(AccountRole::Recycler)?;

    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let revenue_request = app_state.revenue_service.submit(actor.id, request).await?;

    Ok(Json(ApiResponse::ok(revenue_request)))
}

/// List revenue requests with an optional status filter (admin only)
pub async fn list_revenue_requests(
    State(app_state): State<AppState>,
    actor: AuthActor,
    Query(query): Query<ListRevenueRequestsQuery>,
) -> Result<Json<ApiResponse<Vec<RevenueRequest>>>, AppError> {
    actor.require_role(AccountRole::Admin)?;

    let requests = app_state.revenue_service.list_requests(query).await?;

    Ok(Json(ApiResponse::ok(requests)))
}

/// Get a single revenue request (admin, or the recycler who owns it)
pub async fn get_revenue_request(
    State(app_state): State<AppState>,
    actor: AuthActor,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<RevenueRequest>>, AppError> {
    let request = app_state.revenue_service.get_request(&id).await?;

    if actor.role != AccountRole::Admin && request.recycler_id != actor.id {
        return Err(AppError::Forbidden);
    }

    Ok(Json(ApiResponse::ok(request)))
}

/// Approve a pending revenue request and distribute funds (admin only)
pub async fn approve_revenue_request(
    State(app_state): State<AppState>,
    actor: AuthActor,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<RevenueRequest>>, AppError> {
    actor.require_role(AccountRole::Admin)?;

    let approved = app_state.revenue_service.approve(&id).await?;

    // Best-effort SMS to the recycler once the transaction has committed.
    match app_state
        .account_service
        .get_account(&approved.recycler_id)
        .await
    {
        Ok(recycler) => {
            app_state
                .notifier
                .notify_payout_approved(&recycler.phone, approved.total_revenue)
                .await;
        }
        Err(e) => {
            tracing::warn!(request_id = %id, error = %e, "could not load recycler for notification");
        }
    }

    Ok(Json(ApiResponse::ok(approved)))
}

/// Decline a pending revenue request (admin only)
pub async fn decline_revenue_request(
    State(app_state): State<AppState>,
    actor: AuthActor,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<RevenueRequest>>, AppError> {
    actor.require_role(AccountRole::Admin)?;

    let declined = app_state.revenue_service.decline(&id).await?;

    Ok(Json(ApiResponse::ok(declined)))
}
