//! Application state management.
//!
//! This module defines the shared application state passed to route builders.

use database::postgres::DatabaseConnection;

/// Shared application state.
///
/// Cloning is cheap: the connection handle shares the underlying pool.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL connection pool
    pub db: DatabaseConnection,
}
