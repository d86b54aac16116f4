mod config;
mod error;
mod state;
mod vrp;

use std::sync::Arc;

use axum::http::Method;
use axum::routing::get;
use axum::{Router, serve};
use relay_routing::router_client::RouterClient;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing::{Level, info};

use crate::config::ApiConfig;
use crate::state::AppState;
use crate::vrp::routes::vrp_routes;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::from_filename("./.env.local").ok();
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = ApiConfig::from_env()?;
    info!("Using router {:?}", config.router);

    let state = Arc::new(AppState {
        router: RouterClient::new(config.router),
        matrix_concurrency: config.matrix_concurrency,
        max_vehicles: config.max_vehicles,
    });

    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health_handler))
        .merge(vrp_routes(state))
        .layer(ServiceBuilder::new().layer(cors_layer));

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!("Listening on {}", config.bind_address);

    serve(listener, app).await?;

    Ok(())
}

async fn health_handler() -> &'static str {
    "ok"
}
