//! Products API - REST server

use axum_helpers::{create_production_app, create_router, health_router, http};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::sync::Arc;
use tracing::{error, info, warn};

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to PostgreSQL at {}", config.database.redacted_url());

    let db = database::postgres::connect_with_retry(&config.database)
        .await
        .inspect_err(|e| error!("Database unavailable, aborting startup: {}", e))?;

    database::postgres::sync_entity(&db, domain_products::entity::Entity).await?;
    info!("Products table ready");

    let state = AppState {
        config: config.clone(),
        db: Arc::new(db),
    };

    let cors = http::cors_layer_from_origins(state.config.cors_allowed_origin.as_deref())?;
    let router = create_router::<openapi::ApiDoc>(api::routes(&state), cors)
        .merge(health_router(state.config.app))
        .merge(api::health::router(state.clone()));

    info!(
        "Starting {} v{} on port {}",
        state.config.app.name, state.config.app.version, state.config.server.port
    );

    let db = state.db;
    create_production_app(router, &state.config.server, async move {
        info!("Shutting down: closing PostgreSQL connections");
        // Handlers still in flight keep their own handle; the pool drops with them
        let Ok(db) = Arc::try_unwrap(db) else {
            warn!("PostgreSQL connection still shared, skipping explicit close");
            return;
        };
        match database::postgres::close(db).await {
            Ok(()) => info!("PostgreSQL connection closed"),
            Err(e) => warn!("Failed to close PostgreSQL connection: {}", e),
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Products API shutdown complete");
    Ok(())
}
