//! Business logic services for the GreenCycle backend

mod account_service;
mod collection_service;
mod notify;
mod revenue_service;

pub use account_service::AccountService;
pub use collection_service::CollectionService;
pub use notify::SmsNotifier;
pub use revenue_service::{collection_revenue, RevenueService};
