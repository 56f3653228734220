//! Collection handlers: pickup recording, claims, listings

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::auth::AuthActor;
use crate::error::AppError;
use crate::models::{
    AccountRole, ApiResponse, ClaimResponse, Collection, CreatePickupRequest,
};

/// Record a pickup (transporter scan of a user's code)
pub async fn create_pickup(
    State(app_state): State<AppState>,
    actor: AuthActor,
    Json(request): Json<CreatePickupRequest>,
) -> Result<Json<ApiResponse<Collection>>, AppError> {
    actor.require_role(AccountRole::Transporter)?;

    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let collection = app_state
        .collection_service
        .record_pickup(actor.id, request)
        .await?;

    Ok(Json(ApiResponse::ok(collection)))
}

/// Claim every unclaimed pickup of one transporter (recycler scan)
pub async fn claim_by_transporter(
    State(app_state): State<AppState>,
    actor: AuthActor,
    Path(transporter_id): Path<Uuid>,
) -> Result<Json<ApiResponse<ClaimResponse>>, AppError> {
    actor.require_role(AccountRole::Recycler)?;

    let claimed_count = app_state
        .collection_service
        .claim_by_transporter(actor.id, transporter_id)
        .await?;

    Ok(Json(ApiResponse::ok(ClaimResponse { claimed_count })))
}

/// List collections visible to the calling actor
pub async fn list_collections(
    State(app_state): State<AppState>,
    actor: AuthActor,
) -> Result<Json<ApiResponse<Vec<Collection>>>, AppError> {
    let collections = app_state
        .collection_service
        .list_for_actor(actor.id, actor.role)
        .await?;

    Ok(Json(ApiResponse::ok(collections)))
}
