//! Tasks API routes
//!
//! This module wires up the tasks domain to HTTP routes.

use axum::Router;
use domain_tasks::{PgTaskRepository, TaskService, handlers};

use crate::state::AppState;

/// Create tasks router
pub fn router(state: &AppState) -> Router {
    let repository = PgTaskRepository::with_timeout(state.db.clone(), state.config.query_timeout);
    let service = TaskService::new(repository);

    handlers::router(service)
}
