use axum_helpers::server::{create_production_app, create_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_tasks::ensure_schema;
use eyre::WrapErr;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    info!("Connecting to PostgreSQL");

    let db = database::postgres::connect_from_config(config.database.clone())
        .await
        .wrap_err("Unable to create connection pool")?;

    database::postgres::ping(&db)
        .await
        .wrap_err("Unable to connect to database")?;

    ensure_schema(&db, config.init_timeout)
        .await
        .map_err(|e| eyre::eyre!("{}: {}", e, e.detail().unwrap_or_default()))
        .wrap_err("Unable to create tasks table")?;

    let state = AppState { config, db };

    let api_routes = api::routes(&state);
    let app = create_router::<openapi::ApiDoc>(api_routes);

    info!("Starting Tasks API with graceful shutdown (30s timeout)");

    let AppState { config, db } = state;
    create_production_app(app, &config.server, Duration::from_secs(30), async move {
        info!("Shutting down: closing PostgreSQL pool");
        if let Err(e) = database::postgres::close(db).await {
            tracing::error!("Failed to close PostgreSQL pool: {}", e);
        }
    })
    .await
    .wrap_err("Server error")?;

    info!("Tasks API shutdown complete");
    Ok(())
}
