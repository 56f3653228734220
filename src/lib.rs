//! GreenCycle Backend Library
//!
//! This library exports the core modules for the GreenCycle waste-management
//! backend server.

pub mod app_state;
pub mod auth;
pub mod config;
pub mod distribution;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
