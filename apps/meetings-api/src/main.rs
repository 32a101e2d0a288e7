use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::RetryConfig;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    info!(
        url = config.mongodb.url(),
        database = config.mongodb.database(),
        "Connecting to MongoDB"
    );

    // Retries share one overall deadline with the first attempt.
    let connect_timeout = config.mongodb.connect_timeout();
    let retry = RetryConfig::default().with_max_delay(connect_timeout / 4);
    let mongo_client = tokio::time::timeout(
        connect_timeout,
        database::mongodb::connect_from_config_with_retry(&config.mongodb, retry),
    )
    .await
    .map_err(|_| eyre::eyre!("MongoDB not reachable within {:?}", connect_timeout))??;

    let db = mongo_client.database(config.mongodb.database());

    info!(
        database = config.mongodb.database(),
        collection = %config.meetings.collection,
        "Connected to MongoDB"
    );

    let state = AppState {
        config,
        mongo_client,
        db,
    };

    let api_routes = api::routes(&state);
    let app = create_router::<openapi::ApiDoc>(api_routes).merge(health_router(state.config.app));

    info!(
        version = state.config.app.version,
        "Starting Meetings API ({:?} shutdown timeout)", SHUTDOWN_TIMEOUT
    );

    let server = state.config.server.clone();
    create_production_app(app, &server, SHUTDOWN_TIMEOUT, async move {
        info!("Shutting down: closing MongoDB connections");
        state.mongo_client.shutdown().await;
        info!("MongoDB connections closed");
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Meetings API shutdown complete");
    Ok(())
}
