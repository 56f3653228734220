//! GreenCycle Backend Server
//!
//! Rust backend for the GreenCycle waste-management platform: pickup
//! tracking for users and transporters, recycler claims, and the admin
//! revenue-distribution workflow.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use sqlx::postgres::PgPoolOptions;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use greencycle_server::app_state::AppState;
use greencycle_server::config::Config;
use greencycle_server::routes;
use greencycle_server::services::{
    AccountService, CollectionService, RevenueService, SmsNotifier,
};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Arc::new(Config::from_env());

    let db_pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("failed to run migrations");

    let account_service = Arc::new(AccountService::new(
        db_pool.clone(),
        config.jwt_secret.clone(),
    ));
    let collection_service = Arc::new(CollectionService::new(db_pool.clone()));
    let revenue_service = Arc::new(RevenueService::new(db_pool.clone(), config.split_policy));
    let notifier = Arc::new(SmsNotifier::new(
        config.sms_gateway_url.clone(),
        config.sms_api_key.clone(),
    ));

    let app_state = AppState::new(
        config.clone(),
        account_service,
        collection_service,
        revenue_service,
        notifier,
    );

    // Create the app router
    let app = Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .merge(routes::account_routes())
        .merge(routes::collection_routes())
        .merge(routes::revenue_routes())
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(&config.cors_allowed_origins))
        .with_state(app_state);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));

    tracing::info!("Server starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listener");
    axum::serve(listener, app).await.expect("server error");
}

async fn root() -> &'static str {
    "GreenCycle API Server"
}

async fn health_check() -> &'static str {
    "OK"
}

fn build_cors_layer(allowed_origins: &str) -> CorsLayer {
    let allowed_origins = allowed_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse::<HeaderValue>().ok())
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(false)
}
