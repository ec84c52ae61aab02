//! PostgreSQL database connector and utilities
//!
//! Provides pool creation, liveness checks, and shutdown for the single
//! process-wide pool.

mod config;
mod connector;
mod health;

pub use config::{DEFAULT_DATABASE_URL, PostgresConfig};
pub use connector::{close, connect_from_config, connect_with_options};
pub use health::{check_health, ping};

// Re-export SeaORM types for convenience
pub use sea_orm::{ConnectOptions, DatabaseConnection, DbErr};
