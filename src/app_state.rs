//! Application state shared across handlers

use std::sync::Arc;

use axum::extract::FromRef;

use crate::config::Config;
use crate::services::{AccountService, CollectionService, RevenueService, SmsNotifier};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub account_service: Arc<AccountService>,
    pub collection_service: Arc<CollectionService>,
    pub revenue_service: Arc<RevenueService>,
    pub notifier: Arc<SmsNotifier>,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        account_service: Arc<AccountService>,
        collection_service: Arc<CollectionService>,
        revenue_service: Arc<RevenueService>,
        notifier: Arc<SmsNotifier>,
    ) -> Self {
        Self {
            config,
            account_service,
            collection_service,
            revenue_service,
            notifier,
        }
    }
}

impl FromRef<AppState> for Arc<AccountService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.account_service.clone()
    }
}

impl FromRef<AppState> for Arc<CollectionService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.collection_service.clone()
    }
}

impl FromRef<AppState> for Arc<RevenueService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.revenue_service.clone()
    }
}
