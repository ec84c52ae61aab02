//! Server infrastructure module.
//!
//! - Router assembly with cross-cutting middleware and the OpenAPI document
//! - Health and readiness endpoints
//! - Graceful shutdown coordination with connection cleanup
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//! use core_config::{server::ServerConfig, app_info};
//!
//! let routes = api_routes.merge(health_router(app_info!()));
//! let app = create_router::<ApiDoc>(routes);
//!
//! create_production_app(app, &ServerConfig::default(), Duration::from_secs(30), async {}).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{OPENAPI_PATH, create_production_app, create_router};
pub use health::{HealthCheckFuture, HealthResponse, health_handler, health_router, run_health_checks};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
