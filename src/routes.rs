//! Route definitions for the GreenCycle API

use axum::{
    routing::{get, post},
    Router,
};

use crate::app_state::AppState;
use crate::handlers::*;

// Auth and account routes
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/accounts/me", get(get_me))
        .route("/api/accounts", get(list_accounts))
}

// Collection routes
pub fn collection_routes() -> Router<AppState> {
    Router::new()
        .route("/api/collections", post(create_pickup))
        .route("/api/collections", get(list_collections))
        .route(
            "/api/collections/claim/:transporter_id",
            post(claim_by_transporter),
        )
}

// Revenue request routes
pub fn revenue_routes() -> Router<AppState> {
    Router::new()
        .route("/api/revenue-requests", post(submit_revenue_request))
        .route("/api/revenue-requests", get(list_revenue_requests))
        .route("/api/revenue-requests/:id", get(get_revenue_request))
        .route(
            "/api/revenue-requests/:id/approve",
            post(approve_revenue_request),
        )
        .route(
            "/api/revenue-requests/:id/decline",
            post(decline_revenue_request),
        )
}
