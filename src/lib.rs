//! Cancha Sports Center Booking Platform
//!
//! Backend for a multi-tenant sports-center booking platform: court
//! availability, time-zone-aware operating hours, dynamic pricing and
//! conflict-aware reservation creation, exposed as a REST JSON API.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod scheduling;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
