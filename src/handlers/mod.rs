//! API handlers for the GreenCycle backend

mod accounts;
mod auth;
mod collections;
mod revenue;

pub use accounts::{get_me, list_accounts};
pub use auth::{login, register};
pub use collections::{claim_by_transporter, create_pickup, list_collections};
pub use revenue::{
    approve_revenue_request, decline_revenue_request, get_revenue_request,
    list_revenue_requests, submit_revenue_request,
};
