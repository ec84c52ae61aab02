//! API routes module
//!
//! This module defines all HTTP routes served by the tasks API.

pub mod health;
pub mod tasks;

use axum::Router;
use axum_helpers::server::health_router;

use crate::state::AppState;

/// Create all routes, mounted at the root
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .merge(tasks::router(state))
        .merge(health::router(state.clone()))
        .merge(health_router(state.config.app))
}
